use std::fmt;

/// Hardware keyboard position identifier, independent of the produced character.
///
/// Numbering follows the set-1 convention used by keyboard sound packs, with
/// extended keys encoded as `0xE0 << 8 | code`. Zero never names a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScanCode(u32);

impl ScanCode {
    /// Placeholder for keys with no mapping. Never present in a sound table.
    pub const UNMAPPED: ScanCode = ScanCode(0);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_mapped(&self) -> bool {
        self.value() != Self::UNMAPPED.value()
    }
}

impl fmt::Display for ScanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
