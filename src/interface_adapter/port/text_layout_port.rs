/// Text-layout service used for scrollback eviction.
///
/// Concrete implementations (e.g., WrappedTextLayout) live in infrastructure.
pub trait TextLayoutPort: Send {
    /// Number of visual lines `text` occupies after wrapping.
    fn visual_line_count(&self, text: &str) -> usize;
}
