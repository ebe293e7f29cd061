use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, Source};

use crate::shared::error::AppError;

const CLICK_SAMPLE_RATE: u32 = 44_100;
const CLICK_LENGTH: Duration = Duration::from_millis(30);
const CLICK_FREQUENCY: f32 = 1_800.0;

/// A fully decoded audio clip held in memory.
///
/// Cues are slices of one sheet, so it is decoded once and shared by every
/// voice. Playback reads straight from the shared samples.
#[derive(Debug)]
pub struct SpriteSheet {
    channels: u16,
    sample_rate: u32,
    samples: Arc<[i16]>,
}

impl SpriteSheet {
    pub fn new(channels: u16, sample_rate: u32, samples: Vec<i16>) -> Self {
        Self {
            channels: channels.max(1),
            sample_rate,
            samples: samples.into(),
        }
    }

    /// Decode any format rodio understands (wav, ogg, flac, mp3).
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let bytes = std::fs::read(path).map_err(|e| AppError::AudioDecode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let decoder = Decoder::new(Cursor::new(bytes)).map_err(|e| AppError::AudioDecode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<i16> = decoder.collect();
        tracing::info!(
            path = %path.display(),
            channels,
            sample_rate,
            samples = samples.len(),
            "Decoded audio sprite"
        );
        Ok(Self::new(channels, sample_rate, samples))
    }

    /// A short decaying tone, used when no typewriter clip is configured.
    pub fn click() -> Self {
        let frames = CLICK_SAMPLE_RATE as usize * CLICK_LENGTH.as_millis() as usize / 1000;
        let samples = (0..frames)
            .map(|i| {
                let t = i as f32 / CLICK_SAMPLE_RATE as f32;
                let envelope = 1.0 - i as f32 / frames as f32;
                let tone = (t * CLICK_FREQUENCY * std::f32::consts::TAU).sin();
                (tone * envelope * envelope * 0.3 * i16::MAX as f32) as i16
            })
            .collect();
        Self::new(1, CLICK_SAMPLE_RATE, samples)
    }

    /// An empty clip; every source built from it ends immediately.
    pub fn silent() -> Self {
        Self::new(1, CLICK_SAMPLE_RATE, Vec::new())
    }

    pub fn duration(&self) -> Duration {
        let frames = self.samples.len() / self.channels as usize;
        Duration::from_secs_f64(frames as f64 / self.sample_rate.max(1) as f64)
    }

    /// Index of the first sample at `offset`, aligned to a frame boundary.
    fn sample_index(&self, offset: Duration) -> usize {
        let frame = (offset.as_secs_f64() * self.sample_rate as f64) as usize;
        (frame * self.channels as usize).min(self.samples.len())
    }

    /// A playable source starting `offset` into the clip.
    pub fn source_from(&self, offset: Duration) -> SpriteSource {
        SpriteSource {
            samples: Arc::clone(&self.samples),
            position: self.sample_index(offset),
            channels: self.channels,
            sample_rate: self.sample_rate,
        }
    }
}

/// Zero-copy playback cursor into a `SpriteSheet`.
pub struct SpriteSource {
    samples: Arc<[i16]>,
    position: usize,
    channels: u16,
    sample_rate: u32,
}

impl Iterator for SpriteSource {
    type Item = i16;

    fn next(&mut self) -> Option<i16> {
        let sample = self.samples.get(self.position).copied()?;
        self.position += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl Source for SpriteSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}
