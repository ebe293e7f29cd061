pub mod command_port;
pub mod render_port;
pub mod text_layout_port;
pub mod voice_port;

pub use command_port::CommandPort;
pub use render_port::RenderPort;
pub use text_layout_port::TextLayoutPort;
pub use voice_port::VoicePort;
