pub mod rodio_voice;
pub mod sprite_sheet;

use std::path::Path;
use std::sync::Arc;

use rodio::{OutputStream, OutputStreamHandle};

pub use rodio_voice::RodioVoice;
pub use sprite_sheet::{SpriteSheet, SpriteSource};

use crate::domain::model::KeySoundTable;
use crate::shared::config::AudioSettings;
use crate::shared::error::AppError;
use crate::usecase::cue_player::build_table;

/// The default output device. Dropping it silences every voice.
pub struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl AudioOutput {
    pub fn open() -> Result<Self, AppError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AppError::AudioDevice(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    pub fn handle(&self) -> &OutputStreamHandle {
        &self.handle
    }
}

/// Assets behind the keystroke and typewriter cues.
pub struct CueAssets {
    pub table: KeySoundTable,
    pub key_sheet: Arc<SpriteSheet>,
    pub typewriter_sheet: Arc<SpriteSheet>,
}

/// Read the sound-pack config and decode the sprite sheets.
///
/// Every failure is logged and degrades to silence: an empty table, or a
/// silent sheet. The typewriter cue falls back to a synthesized click.
pub fn load_cue_assets(settings: &AudioSettings) -> CueAssets {
    let table = match &settings.config_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => build_table(&text),
            Err(source) => {
                let e = AppError::ConfigRead {
                    path: path.clone(),
                    source,
                };
                tracing::error!("{}", e);
                KeySoundTable::empty()
            }
        },
        None => {
            tracing::warn!("No sound config configured; keystroke cues are disabled");
            KeySoundTable::empty()
        }
    };

    let key_sheet = settings
        .sprite_path
        .as_deref()
        .map(load_or_silent)
        .unwrap_or_else(SpriteSheet::silent);

    let typewriter_sheet = settings
        .typewriter_path
        .as_deref()
        .map(load_or_silent)
        .unwrap_or_else(SpriteSheet::click);

    CueAssets {
        table,
        key_sheet: Arc::new(key_sheet),
        typewriter_sheet: Arc::new(typewriter_sheet),
    }
}

fn load_or_silent(path: &Path) -> SpriteSheet {
    SpriteSheet::load(path).unwrap_or_else(|e| {
        tracing::error!("{}", e);
        SpriteSheet::silent()
    })
}
