pub mod layout;
pub mod screen_view;
