use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::primitive::{ScanCode, SoundSlice};
use crate::shared::error::AppError;

/// `"<scan code>": [<start ms>, <duration ms>]`
static ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(\d+)"\s*:\s*\[\s*(\d+)\s*,\s*(\d+)\s*\]"#).expect("entry pattern is valid")
});

static DEFINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""defines"\s*:\s*\{"#).expect("defines pattern is valid"));

/// Scan code to sprite-slice map, built once from a sound-pack config.
#[derive(Debug, Default, Clone)]
pub struct KeySoundTable {
    entries: HashMap<ScanCode, SoundSlice>,
    first: Option<ScanCode>,
}

impl KeySoundTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Extract every `"<digits>": [<digits>, <digits>]` entry in `text`.
    ///
    /// Only this narrow shape is recognised; sibling fields are ignored and a
    /// repeated scan code overwrites the earlier slice. Entries whose numbers
    /// overflow are skipped.
    pub fn parse(text: &str) -> Result<Self, AppError> {
        if !DEFINES.is_match(text) {
            return Err(AppError::MissingSoundDefines);
        }

        let mut table = Self::empty();
        for caps in ENTRY.captures_iter(text) {
            let (Ok(code), Ok(start_ms), Ok(duration_ms)) = (
                caps[1].parse::<u32>(),
                caps[2].parse::<u64>(),
                caps[3].parse::<u64>(),
            ) else {
                continue;
            };
            table.insert(ScanCode::new(code), SoundSlice::from_millis(start_ms, duration_ms));
        }

        if table.is_empty() {
            return Err(AppError::MalformedSoundConfig);
        }
        Ok(table)
    }

    fn insert(&mut self, code: ScanCode, slice: SoundSlice) {
        if self.first.is_none() {
            self.first = Some(code);
        }
        self.entries.insert(code, slice);
    }

    pub fn get(&self, code: ScanCode) -> Option<SoundSlice> {
        self.entries.get(&code).copied()
    }

    /// Slice played for keys the table does not know: the first one parsed.
    pub fn fallback(&self) -> Option<SoundSlice> {
        self.first.and_then(|code| self.get(code))
    }

    /// Exact match, else the fallback slice, else nothing for an empty table.
    pub fn resolve(&self, code: ScanCode) -> Option<SoundSlice> {
        self.get(code).or_else(|| self.fallback())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
