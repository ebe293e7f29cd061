use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::interface_adapter::port::TextLayoutPort;

/// Character-wrapping layout over a shared column width.
///
/// The app runner keeps a `WrapWidth` handle and updates it on resize; the
/// screen view wraps with `wrap_line` so what is counted is what is drawn.
pub struct WrappedTextLayout {
    width: WrapWidth,
}

/// Shared column count. Zero disables wrapping.
#[derive(Debug, Clone, Default)]
pub struct WrapWidth(Arc<AtomicU16>);

impl WrapWidth {
    pub fn new(cols: u16) -> Self {
        Self(Arc::new(AtomicU16::new(cols)))
    }

    pub fn get(&self) -> u16 {
        self.0.load(Ordering::Relaxed)
    }

    /// Returns true if the width actually changed.
    pub fn set(&self, cols: u16) -> bool {
        self.0.swap(cols, Ordering::Relaxed) != cols
    }
}

impl WrappedTextLayout {
    pub fn new(width: WrapWidth) -> Self {
        Self { width }
    }
}

impl TextLayoutPort for WrappedTextLayout {
    fn visual_line_count(&self, text: &str) -> usize {
        let cols = self.width.get() as usize;
        text.lines().map(|line| line_rows(line, cols)).sum()
    }
}

fn line_rows(line: &str, cols: usize) -> usize {
    if cols == 0 {
        return 1;
    }
    wrap_line(line, cols).len()
}

/// Split one logical line into rows no wider than `cols` display cells.
///
/// An empty line still occupies one row. A glyph wider than `cols` gets a
/// row to itself.
pub fn wrap_line(line: &str, cols: usize) -> Vec<String> {
    if cols == 0 || UnicodeWidthStr::width(line) <= cols {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_width = 0;
    for ch in line.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if row_width + w > cols && !row.is_empty() {
            rows.push(std::mem::take(&mut row));
            row_width = 0;
        }
        row.push(ch);
        row_width += w;
    }
    rows.push(row);
    rows
}
