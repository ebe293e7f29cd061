pub mod scan_code;
pub mod session_state;
pub mod sound_slice;
pub mod input_event;

pub use scan_code::ScanCode;
pub use session_state::SessionState;
pub use sound_slice::SoundSlice;
pub use input_event::InputEvent;
