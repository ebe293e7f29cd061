use std::sync::Arc;
use std::time::Duration;

use rodio::{OutputStreamHandle, Sink};

use super::sprite_sheet::SpriteSheet;
use crate::interface_adapter::port::VoicePort;

/// One rodio `Sink` playing slices of a shared sprite sheet.
///
/// Without a sink (no output device) the voice only tracks its playhead and
/// stays silent.
pub struct RodioVoice {
    sink: Option<Sink>,
    sheet: Arc<SpriteSheet>,
    offset: Duration,
}

impl RodioVoice {
    pub fn new(handle: &OutputStreamHandle, sheet: Arc<SpriteSheet>) -> Self {
        let sink = match Sink::try_new(handle) {
            Ok(sink) => Some(sink),
            Err(e) => {
                tracing::warn!("Failed to open audio voice: {}", e);
                None
            }
        };
        Self {
            sink,
            sheet,
            offset: Duration::ZERO,
        }
    }

    pub fn silent(sheet: Arc<SpriteSheet>) -> Self {
        Self {
            sink: None,
            sheet,
            offset: Duration::ZERO,
        }
    }

    #[cfg(test)]
    pub fn offset(&self) -> Duration {
        self.offset
    }
}

impl VoicePort for RodioVoice {
    fn seek(&mut self, offset: Duration) {
        self.offset = offset;
    }

    fn play(&mut self) {
        if let Some(sink) = &self.sink {
            // clear() drops the queued slice without blocking on the mixer.
            sink.clear();
            sink.append(self.sheet.source_from(self.offset));
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = &self.sink {
            sink.clear();
        }
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|sink| !sink.empty() && !sink.is_paused())
    }
}
