pub mod wrapped_text_layout;

pub use wrapped_text_layout::{WrapWidth, WrappedTextLayout, wrap_line};
