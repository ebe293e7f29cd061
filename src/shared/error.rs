use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[source] toml::de::Error),

    #[error("No audio output device: {0}")]
    AudioDevice(String),

    #[error("Failed to decode audio {path}: {reason}")]
    AudioDecode { path: PathBuf, reason: String },

    #[error("No render target attached; output will not be displayed")]
    MissingRenderTarget,

    #[error("No command dispatcher attached; every command gets the fallback response")]
    MissingDispatcher,

    #[error("Sound config has no \"defines\" section")]
    MissingSoundDefines,

    #[error("Sound config \"defines\" section has no usable entries")]
    MalformedSoundConfig,

    #[error("Voice pool is empty; keystroke cues are disabled")]
    EmptyVoicePool,
}
