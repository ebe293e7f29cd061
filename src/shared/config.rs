use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::shared::error::AppError;

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "RETROTERM_CONFIG";

/// Settings file looked up in the working directory when `CONFIG_ENV` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "retroterm.toml";

pub const DEFAULT_FALLBACK_TEXT: &str = "I DO NOT UNDERSTAND";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub prompt: String,
    pub cursor_glyph: String,
    pub max_visual_lines: usize,
    pub response_delay_ms: u64,
    pub char_delay_ms: u64,
    pub blink_interval_ms: u64,
    pub voice_count: usize,
    pub fallback_text: String,
    pub audio: AudioSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Audio sprite sheet holding every keystroke slice.
    pub sprite_path: Option<PathBuf>,
    /// Sound-pack config with the `"defines"` scan-code map.
    pub config_path: Option<PathBuf>,
    /// Separate clip for the reveal cue. A synthesized click is used when unset.
    pub typewriter_path: Option<PathBuf>,
    pub typewriter_start_ms: u64,
    pub typewriter_duration_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            cursor_glyph: "_".to_string(),
            max_visual_lines: 24,
            response_delay_ms: 400,
            char_delay_ms: 30,
            blink_interval_ms: 500,
            voice_count: 8,
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
            audio: AudioSettings::default(),
        }
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sprite_path: None,
            config_path: None,
            typewriter_path: None,
            typewriter_start_ms: 0,
            typewriter_duration_ms: 40,
        }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self, AppError> {
        toml::from_str(text).map_err(AppError::ConfigParse)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Resolve the settings file from the environment, falling back to the
    /// working directory and finally to built-in defaults.
    pub fn discover() -> Result<Self, AppError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }
        Ok(Self::default())
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }
}
