use std::sync::Arc;

use crate::infrastructure::audio::{AudioOutput, RodioVoice, SpriteSheet};

/// Creates the round-robin voice pool. Without an output device every voice
/// is silent.
pub fn create_voice_pool(
    output: Option<&AudioOutput>,
    sheet: &Arc<SpriteSheet>,
    count: usize,
) -> Vec<RodioVoice> {
    (0..count)
        .map(|_| create_voice(output, Arc::clone(sheet)))
        .collect()
}

/// Creates a single voice, e.g. the dedicated typewriter voice.
pub fn create_voice(output: Option<&AudioOutput>, sheet: Arc<SpriteSheet>) -> RodioVoice {
    match output {
        Some(output) => RodioVoice::new(output.handle(), sheet),
        None => RodioVoice::silent(sheet),
    }
}
