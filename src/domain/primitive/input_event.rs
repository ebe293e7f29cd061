use super::ScanCode;

/// Discrete events delivered by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A text character was produced.
    Character(char),
    /// A physical key went down. `is_repeat` is set for auto-repeat pulses.
    KeyDown { scan_code: ScanCode, is_repeat: bool },
    Submit,
    Cancel,
    Backspace,
}
