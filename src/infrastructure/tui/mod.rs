pub mod app_runner;
pub mod input;
pub mod screen_buffer;
pub mod widgets;
