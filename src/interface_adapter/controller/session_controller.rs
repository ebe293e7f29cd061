use std::time::Duration;

use crate::domain::primitive::InputEvent;
use crate::interface_adapter::port::{CommandPort, RenderPort, TextLayoutPort, VoicePort};
use crate::usecase::terminal_session::TerminalSession;

/// TUI actions (infrastructure-independent).
///
/// The TUI layer converts key events and clock ticks into `AppAction`s, and
/// `SessionController::dispatch` forwards them to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Input(InputEvent),
    /// Frame tick carrying the time elapsed since the session started.
    Frame(Duration),
    /// The display width changed.
    Relayout,
    Quit,
}

/// Thin controller that owns the session and its lifecycle.
///
/// Lives in `interface_adapter` so it has no dependency on infrastructure
/// (ratatui, crossterm, rodio). The app runner owns a `SessionController` and
/// calls `dispatch` for every input event and once per frame.
pub struct SessionController<R, L, D, V>
where
    R: RenderPort,
    L: TextLayoutPort,
    D: CommandPort,
    V: VoicePort,
{
    session: TerminalSession<R, L, D, V>,
}

impl<R, L, D, V> SessionController<R, L, D, V>
where
    R: RenderPort,
    L: TextLayoutPort,
    D: CommandPort,
    V: VoicePort,
{
    /// Take ownership of the session and initialise it.
    pub fn new(mut session: TerminalSession<R, L, D, V>) -> Self {
        session.init();
        Self { session }
    }

    /// Dispatch an action to the session.
    ///
    /// `AppAction::Quit` tears the session down; the runner checks the action
    /// itself to leave its loop.
    pub fn dispatch(&mut self, action: AppAction) {
        match action {
            AppAction::Input(event) => self.session.handle_input(event),
            AppAction::Frame(now) => self.session.on_frame(now),
            AppAction::Relayout => self.session.relayout(),
            AppAction::Quit => self.session.teardown(),
        }
    }

    /// Read accessor for UI rendering.
    pub fn session(&self) -> &TerminalSession<R, L, D, V> {
        &self.session
    }
}

impl<R, L, D, V> Drop for SessionController<R, L, D, V>
where
    R: RenderPort,
    L: TextLayoutPort,
    D: CommandPort,
    V: VoicePort,
{
    fn drop(&mut self) {
        self.session.teardown();
    }
}
