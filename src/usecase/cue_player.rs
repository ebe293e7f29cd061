use std::time::Duration;

use crate::domain::model::KeySoundTable;
use crate::domain::primitive::{ScanCode, SoundSlice};
use crate::interface_adapter::port::VoicePort;
use crate::shared::error::AppError;
use crate::shared::timer_wheel::{TimerId, TimerWheel};

/// Which voice a pending auto-stop belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VoiceStop {
    Pool(usize),
    Typewriter,
}

/// Build the key sound table from sound-pack config text.
///
/// A missing or empty `"defines"` section is logged and yields an empty
/// table, which turns every keystroke cue into a no-op.
pub fn build_table(config_text: &str) -> KeySoundTable {
    match KeySoundTable::parse(config_text) {
        Ok(table) => {
            tracing::info!(entries = table.len(), "Loaded key sound table");
            table
        }
        Err(e) => {
            tracing::error!("{}", e);
            KeySoundTable::empty()
        }
    }
}

/// Keyed audio cue player.
///
/// Keystroke cues rotate through a fixed pool of voices so overlapping presses
/// do not cut each other off. The reveal ("typewriter") cue has a voice of its
/// own. Every cue gets an auto-stop after its slice duration; a voice that is
/// re-triggered first has its stale auto-stop cancelled.
pub struct CuePlayer<V: VoicePort> {
    table: KeySoundTable,
    voices: Vec<V>,
    next_voice: usize,
    stop_timers: Vec<Option<TimerId>>,
    typewriter: V,
    typewriter_cue: SoundSlice,
    typewriter_stop: Option<TimerId>,
    timers: TimerWheel<VoiceStop>,
}

impl<V: VoicePort> CuePlayer<V> {
    pub fn new(
        table: KeySoundTable,
        voices: Vec<V>,
        typewriter: V,
        typewriter_cue: SoundSlice,
    ) -> Self {
        let stop_timers = vec![None; voices.len()];
        Self {
            table,
            voices,
            next_voice: 0,
            stop_timers,
            typewriter,
            typewriter_cue,
            typewriter_stop: None,
            timers: TimerWheel::new(),
        }
    }

    /// Log configuration problems that silence keystroke cues.
    pub fn report_defects(&self) {
        if self.voices.is_empty() {
            tracing::error!("{}", AppError::EmptyVoicePool);
        }
        if self.table.is_empty() {
            tracing::warn!("Key sound table is empty; keystroke cues are disabled");
        }
    }

    /// Play the cue for a physical key on the next pool voice.
    ///
    /// Unknown scan codes fall back to the first table entry. Returns the voice
    /// index used, or `None` when the table or the pool is empty.
    pub fn play_for_key(&mut self, code: ScanCode) -> Option<usize> {
        if self.voices.is_empty() {
            return None;
        }
        let slice = self.table.resolve(code)?;

        let index = self.next_voice;
        self.next_voice = (self.next_voice + 1) % self.voices.len();

        let voice = &mut self.voices[index];
        voice.seek(slice.start);
        voice.play();

        if let Some(stale) = self.stop_timers[index].take() {
            self.timers.cancel(stale);
        }
        self.stop_timers[index] = Some(self.timers.schedule(slice.duration, VoiceStop::Pool(index)));

        tracing::trace!(scan_code = %code, mapped = code.is_mapped(), voice = index, "Keystroke cue");
        Some(index)
    }

    /// Play the short reveal cue on its dedicated voice.
    pub fn play_typewriter_cue(&mut self) {
        self.typewriter.seek(self.typewriter_cue.start);
        self.typewriter.play();

        if let Some(stale) = self.typewriter_stop.take() {
            self.timers.cancel(stale);
        }
        self.typewriter_stop = Some(
            self.timers
                .schedule(self.typewriter_cue.duration, VoiceStop::Typewriter),
        );
    }

    /// Run auto-stops that are due at `now`.
    pub fn advance(&mut self, now: Duration) {
        while let Some(stop) = self.timers.pop_due(now) {
            match stop {
                VoiceStop::Pool(index) => {
                    self.stop_timers[index] = None;
                    self.voices[index].stop();
                }
                VoiceStop::Typewriter => {
                    self.typewriter_stop = None;
                    self.typewriter.stop();
                }
            }
        }
        self.timers.advance_to(now);
    }

    /// Silence every voice and drop pending auto-stops.
    pub fn stop_all(&mut self) {
        tracing::debug!(pending = self.timers.len(), "Stopping all voices");
        self.timers.clear();
        self.stop_timers.iter_mut().for_each(|t| *t = None);
        self.typewriter_stop = None;
        for voice in &mut self.voices {
            voice.stop();
        }
        self.typewriter.stop();
    }

    #[cfg(test)]
    pub fn voices(&self) -> &[V] {
        &self.voices
    }

    pub fn typewriter_voice(&self) -> &V {
        &self.typewriter
    }
}
