use std::time::Duration;

/// A cue's window inside the audio sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundSlice {
    pub start: Duration,
    pub duration: Duration,
}

impl SoundSlice {
    pub fn new(start: Duration, duration: Duration) -> Self {
        Self { start, duration }
    }

    pub fn from_millis(start_ms: u64, duration_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(start_ms),
            Duration::from_millis(duration_ms),
        )
    }
}
