pub mod scrollback;
pub mod input_line;
pub mod key_sound_table;

pub use scrollback::Scrollback;
pub use input_line::InputLine;
pub use key_sound_table::KeySoundTable;
