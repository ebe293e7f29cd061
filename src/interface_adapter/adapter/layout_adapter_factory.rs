use crate::infrastructure::layout::{WrapWidth, WrappedTextLayout};

/// Creates the TextLayoutPort implementation plus the width handle the app
/// runner updates on resize.
pub fn create_layout_adapter(cols: u16) -> (WrappedTextLayout, WrapWidth) {
    let width = WrapWidth::new(cols);
    (WrappedTextLayout::new(width.clone()), width)
}
