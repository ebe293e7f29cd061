use std::collections::VecDeque;

/// Ordered output history. Lines are only appended or evicted from the front.
#[derive(Debug, Default, Clone)]
pub struct Scrollback {
    lines: VecDeque<String>,
}

impl Scrollback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
    }

    /// Append a character to the newest line, opening one if the buffer is empty.
    pub fn append_to_last(&mut self, ch: char) {
        match self.lines.back_mut() {
            Some(line) => line.push(ch),
            None => self.lines.push_back(ch.to_string()),
        }
    }

    /// Drop the oldest line. Returns it, or `None` when already empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Each line followed by a line break.
    pub fn joined(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
