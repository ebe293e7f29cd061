/// The command line being typed. Always uppercase.
#[derive(Debug, Default, Clone)]
pub struct InputLine {
    text: String,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `ch` uppercased. Some characters expand to several (e.g. `ß`).
    pub fn push(&mut self, ch: char) {
        self.text.extend(ch.to_uppercase());
    }

    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Take the line trimmed of surrounding whitespace, leaving it empty.
    pub fn take_trimmed(&mut self) -> String {
        let trimmed = self.text.trim().to_string();
        self.text.clear();
        trimmed
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
