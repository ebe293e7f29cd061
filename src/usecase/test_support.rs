//! Recording port doubles shared by the usecase tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::interface_adapter::port::{CommandPort, RenderPort, TextLayoutPort, VoicePort};

// =========================================================================
// Voice
// =========================================================================

/// A voice operation. `None` identifies the typewriter voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceOp {
    Seek(Option<usize>, Duration),
    Play(Option<usize>),
    Stop(Option<usize>),
}

#[derive(Clone, Default)]
pub struct VoiceLog(Arc<Mutex<Vec<VoiceOp>>>);

impl VoiceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<VoiceOp> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    fn push(&self, op: VoiceOp) {
        self.0.lock().unwrap().push(op);
    }
}

pub struct MockVoice {
    id: Option<usize>,
    playing: bool,
    log: VoiceLog,
}

impl MockVoice {
    pub fn new(index: usize, log: VoiceLog) -> Self {
        Self {
            id: Some(index),
            playing: false,
            log,
        }
    }

    pub fn typewriter(log: VoiceLog) -> Self {
        Self {
            id: None,
            playing: false,
            log,
        }
    }
}

impl VoicePort for MockVoice {
    fn seek(&mut self, offset: Duration) {
        self.log.push(VoiceOp::Seek(self.id, offset));
    }

    fn play(&mut self) {
        self.playing = true;
        self.log.push(VoiceOp::Play(self.id));
    }

    fn stop(&mut self) {
        self.playing = false;
        self.log.push(VoiceOp::Stop(self.id));
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

// =========================================================================
// Render / layout / command
// =========================================================================

/// Keeps every published render.
#[derive(Clone, Default)]
pub struct MockRender {
    pub renders: Arc<Mutex<Vec<String>>>,
}

impl MockRender {
    pub fn last(&self) -> Option<String> {
        self.renders.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.renders.lock().unwrap().len()
    }
}

impl RenderPort for MockRender {
    fn publish(&mut self, render: &str) {
        self.renders.lock().unwrap().push(render.to_string());
    }
}

/// Wraps at a fixed column count, one visual line per `width` characters.
pub struct MockLayout {
    pub width: usize,
}

impl TextLayoutPort for MockLayout {
    fn visual_line_count(&self, text: &str) -> usize {
        text.lines()
            .map(|line| line.chars().count().div_ceil(self.width).max(1))
            .sum()
    }
}

/// Canned responses keyed by command; records every command received.
#[derive(Clone, Default)]
pub struct MockCommands {
    pub responses: HashMap<String, String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockCommands {
    pub fn with(mut self, command: &str, response: &str) -> Self {
        self.responses.insert(command.to_string(), response.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandPort for MockCommands {
    fn process(&mut self, command: &str) -> Option<String> {
        self.calls.lock().unwrap().push(command.to_string());
        self.responses.get(command).cloned()
    }
}
