use std::sync::{Arc, Mutex};

use crate::interface_adapter::port::RenderPort;

/// Render target read by the draw loop.
///
/// The session publishes into it; the app runner keeps a clone and draws the
/// latest text on every frame.
#[derive(Clone, Default)]
pub struct ScreenBuffer {
    text: Arc<Mutex<String>>,
}

impl ScreenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> String {
        self.text
            .lock()
            .map(|text| text.clone())
            .unwrap_or_default()
    }
}

impl RenderPort for ScreenBuffer {
    fn publish(&mut self, render: &str) {
        if let Ok(mut text) = self.text.lock() {
            text.clear();
            text.push_str(render);
        }
    }
}
