use std::time::Duration;

/// One independent playback channel over the audio sprite sheet.
///
/// Voices never interrupt each other; polyphony comes from owning several.
pub trait VoicePort: Send {
    /// Position the playhead `offset` into the clip.
    fn seek(&mut self, offset: Duration);

    /// Start (or restart) playback from the current playhead.
    fn play(&mut self);

    /// Silence the voice. Stopping an idle voice is harmless.
    fn stop(&mut self);

    fn is_playing(&self) -> bool;
}
