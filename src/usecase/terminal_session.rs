use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::model::{InputLine, Scrollback};
use crate::domain::primitive::{InputEvent, ScanCode, SessionState};
use crate::interface_adapter::port::{CommandPort, RenderPort, TextLayoutPort, VoicePort};
use crate::shared::config::Settings;
use crate::shared::error::AppError;
use crate::shared::timer_wheel::{TimerId, TimerWheel};
use crate::usecase::cue_player::CuePlayer;

/// Timing and text parameters of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub prompt: String,
    pub cursor_glyph: String,
    pub max_visual_lines: usize,
    pub response_delay: Duration,
    pub char_delay: Duration,
    /// Zero disables blinking; the cursor then stays on.
    pub blink_interval: Duration,
    pub fallback_text: String,
}

impl From<&Settings> for SessionConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            prompt: settings.prompt.clone(),
            cursor_glyph: settings.cursor_glyph.clone(),
            max_visual_lines: settings.max_visual_lines,
            response_delay: settings.response_delay(),
            char_delay: settings.char_delay(),
            blink_interval: settings.blink_interval(),
            fallback_text: settings.fallback_text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTimer {
    CursorBlink,
    RevealStep,
}

/// Text still to be disclosed by the running reveal.
struct Reveal {
    pending: VecDeque<char>,
    line_opened: bool,
}

/// The terminal: scrollback, input line, blinking cursor and typewriter reveal.
///
/// Single-threaded and cooperative. Nothing blocks; every wait is a task on the
/// session's timer wheel, run from `on_frame`. Only one reveal exists at a
/// time, and starting a new one cancels the previous reveal's pending step.
///
/// A missing render target or dispatcher is logged once by `init` and then
/// tolerated: renders go nowhere, commands get the fallback text.
pub struct TerminalSession<R, L, D, V>
where
    R: RenderPort,
    L: TextLayoutPort,
    D: CommandPort,
    V: VoicePort,
{
    config: SessionConfig,
    render_target: Option<R>,
    layout: L,
    dispatcher: Option<D>,
    cues: CuePlayer<V>,
    scrollback: Scrollback,
    input: InputLine,
    state: SessionState,
    cursor_on: bool,
    reveal: Option<Reveal>,
    reveal_timer: Option<TimerId>,
    blink_timer: Option<TimerId>,
    pending_presses: Vec<ScanCode>,
    timers: TimerWheel<SessionTimer>,
    attached: bool,
    current_render: String,
}

impl<R, L, D, V> TerminalSession<R, L, D, V>
where
    R: RenderPort,
    L: TextLayoutPort,
    D: CommandPort,
    V: VoicePort,
{
    pub fn new(
        config: SessionConfig,
        render_target: Option<R>,
        layout: L,
        dispatcher: Option<D>,
        cues: CuePlayer<V>,
    ) -> Self {
        Self {
            config,
            render_target,
            layout,
            dispatcher,
            cues,
            scrollback: Scrollback::new(),
            input: InputLine::new(),
            state: SessionState::Idle,
            cursor_on: true,
            reveal: None,
            reveal_timer: None,
            blink_timer: None,
            pending_presses: Vec::new(),
            timers: TimerWheel::new(),
            attached: false,
            current_render: String::new(),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Report configuration defects, start the cursor blink and attach to input.
    pub fn init(&mut self) {
        if self.attached {
            return;
        }
        if self.render_target.is_none() {
            tracing::error!("{}", AppError::MissingRenderTarget);
        }
        if self.dispatcher.is_none() {
            tracing::error!("{}", AppError::MissingDispatcher);
        }
        self.cues.report_defects();

        self.attached = true;
        self.cursor_on = true;
        if !self.config.blink_interval.is_zero() {
            self.blink_timer = Some(
                self.timers
                    .schedule(self.config.blink_interval, SessionTimer::CursorBlink),
            );
        }
        self.refresh();
        tracing::info!("Terminal session started");
    }

    /// Stop every timer and detach. Later events and frames are ignored.
    pub fn teardown(&mut self) {
        if !self.attached {
            return;
        }
        if let Some(blink) = self.blink_timer.take() {
            self.timers.cancel(blink);
        }
        if let Some(step) = self.reveal_timer.take() {
            self.timers.cancel(step);
        }
        self.reveal = None;
        self.pending_presses.clear();
        self.cues.stop_all();
        self.state = self.resting_state();
        self.attached = false;
        tracing::info!("Terminal session stopped");
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Route one input event to its handler.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Character(ch) => {
                self.on_character(ch);
            }
            InputEvent::KeyDown {
                scan_code,
                is_repeat,
            } => self.on_key_down(scan_code, is_repeat),
            InputEvent::Submit => self.on_submit(),
            InputEvent::Cancel => self.on_cancel(),
            InputEvent::Backspace => self.on_backspace(),
        }
    }

    /// Append a typed character. Returns whether it was accepted.
    pub fn on_character(&mut self, ch: char) -> bool {
        if !self.attached || !self.state.accepts_input() || ch.is_control() {
            return false;
        }
        self.input.push(ch);
        self.state = SessionState::Typing;
        self.refresh();
        true
    }

    pub fn on_backspace(&mut self) {
        if !self.attached || !self.state.accepts_input() {
            return;
        }
        self.input.pop();
        self.state = self.resting_state();
        self.refresh();
    }

    /// Clear the input line. Allowed even while a reveal runs; the reveal
    /// itself is left alone.
    pub fn on_cancel(&mut self) {
        if !self.attached {
            return;
        }
        self.input.clear();
        if self.state.accepts_input() {
            self.state = SessionState::Idle;
        }
        self.refresh();
    }

    /// Echo the command line into scrollback and answer it.
    ///
    /// Blank input leaves a bare prompt line and nothing else. Anything else is
    /// dispatched; an absent or empty response reveals the fallback text.
    pub fn on_submit(&mut self) {
        if !self.attached || !self.state.accepts_input() {
            return;
        }
        let command = self.input.take_trimmed();
        self.scrollback
            .push_line(format!("{}{}", self.config.prompt, command));
        self.state = SessionState::Idle;
        self.refresh();

        if command.is_empty() {
            return;
        }

        let response = self
            .dispatcher
            .as_mut()
            .and_then(|dispatcher| dispatcher.process(&command))
            .filter(|response| !response.is_empty())
            .unwrap_or_else(|| self.config.fallback_text.clone());
        tracing::debug!(command = %command, "Command dispatched");
        self.reveal(&response);
    }

    /// Record a physical key press for the next frame's cue check.
    ///
    /// Auto-repeat pulses never make a sound.
    pub fn on_key_down(&mut self, scan_code: ScanCode, is_repeat: bool) {
        if !self.attached || is_repeat || !self.state.accepts_input() {
            return;
        }
        self.pending_presses.push(scan_code);
    }

    // =========================================================================
    // Reveal
    // =========================================================================

    /// Start disclosing `text` one character at a time after the response
    /// delay. Any reveal already in flight is cancelled first.
    pub fn reveal(&mut self, text: &str) {
        if !self.attached {
            return;
        }
        if let Some(previous) = self.reveal_timer.take() {
            self.timers.cancel(previous);
        }
        self.reveal = Some(Reveal {
            pending: text.chars().collect(),
            line_opened: false,
        });
        self.state = SessionState::Revealing;
        self.refresh();
        self.reveal_timer = Some(
            self.timers
                .schedule(self.config.response_delay, SessionTimer::RevealStep),
        );
    }

    fn reveal_step(&mut self) {
        self.reveal_timer = None;
        let Some(reveal) = self.reveal.as_mut() else {
            return;
        };

        let Some(ch) = reveal.pending.pop_front() else {
            self.reveal = None;
            self.state = self.resting_state();
            self.refresh();
            return;
        };

        if !reveal.line_opened {
            reveal.line_opened = true;
            self.scrollback.push_line(String::new());
        }
        match ch {
            '\n' => self.scrollback.push_line(String::new()),
            '\r' => {}
            _ => {
                self.scrollback.append_to_last(ch);
                self.cues.play_typewriter_cue();
            }
        }
        self.refresh();

        self.reveal_timer = Some(
            self.timers
                .schedule(self.config.char_delay, SessionTimer::RevealStep),
        );
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance the session to `now`: sound the key presses recorded since the
    /// last frame, then run every timer task that has come due.
    ///
    /// Presses are dropped unheard while a reveal is in progress, including
    /// the submit key that started it.
    pub fn on_frame(&mut self, now: Duration) {
        if !self.attached {
            return;
        }
        // Cue slices are timed from this frame, not the previous one.
        self.cues.advance(now);
        let presses = std::mem::take(&mut self.pending_presses);
        if self.state != SessionState::Revealing {
            for scan_code in presses {
                self.cues.play_for_key(scan_code);
            }
        }

        while let Some(task) = self.timers.pop_due(now) {
            match task {
                SessionTimer::CursorBlink => self.toggle_cursor(),
                SessionTimer::RevealStep => self.reveal_step(),
            }
        }
        self.timers.advance_to(now);
        self.cues.advance(now);
    }

    fn toggle_cursor(&mut self) {
        self.cursor_on = !self.cursor_on;
        self.refresh();
        self.blink_timer = Some(
            self.timers
                .schedule(self.config.blink_interval, SessionTimer::CursorBlink),
        );
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Re-render after the layout width changed, evicting lines as needed.
    pub fn relayout(&mut self) {
        if self.attached {
            self.refresh();
        }
    }

    /// Compose and publish the screen, then evict old lines until it fits.
    fn refresh(&mut self) {
        self.publish();
        if self.trim_scrollback() {
            self.publish();
        }
    }

    fn publish(&mut self) {
        self.current_render = self.compose();
        if let Some(target) = self.render_target.as_mut() {
            target.publish(&self.current_render);
        }
    }

    fn compose(&self) -> String {
        let mut render = self.scrollback.joined();
        if self.state.accepts_input() {
            render.push_str(&self.config.prompt);
            render.push_str(self.input.as_str());
            if self.cursor_on {
                render.push_str(&self.config.cursor_glyph);
            }
        }
        render
    }

    /// Returns whether any line was evicted.
    fn trim_scrollback(&mut self) -> bool {
        let before = self.scrollback.len();
        while !self.scrollback.is_empty()
            && self.layout.visual_line_count(&self.current_render) > self.config.max_visual_lines
        {
            self.scrollback.evict_oldest();
            self.current_render = self.compose();
        }
        let evicted = before - self.scrollback.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Scrollback trimmed");
        }
        evicted > 0
    }

    fn resting_state(&self) -> SessionState {
        if self.input.is_empty() {
            SessionState::Idle
        } else {
            SessionState::Typing
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_on
    }

    pub fn current_render(&self) -> &str {
        &self.current_render
    }

    pub fn cue_player(&self) -> &CuePlayer<V> {
        &self.cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::primitive::SoundSlice;
    use crate::usecase::cue_player::build_table;
    use crate::usecase::test_support::{
        MockCommands, MockLayout, MockRender, MockVoice, VoiceLog, VoiceOp,
    };

    type TestSession = TerminalSession<MockRender, MockLayout, MockCommands, MockVoice>;

    const PACK: &str = r#"{"defines": {"30": [100, 50], "28": [200, 80]}}"#;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn test_config(max_visual_lines: usize) -> SessionConfig {
        SessionConfig {
            prompt: "> ".to_string(),
            cursor_glyph: "_".to_string(),
            max_visual_lines,
            response_delay: ms(100),
            char_delay: ms(10),
            blink_interval: ms(500),
            fallback_text: "I DO NOT UNDERSTAND".to_string(),
        }
    }

    struct Harness {
        session: TestSession,
        render: MockRender,
        commands: MockCommands,
        voices: VoiceLog,
    }

    fn harness_with(
        commands: Option<MockCommands>,
        render: Option<MockRender>,
        max_visual_lines: usize,
        width: usize,
    ) -> Harness {
        let voices = VoiceLog::new();
        let pool: Vec<MockVoice> = (0..3).map(|i| MockVoice::new(i, voices.clone())).collect();
        let cues = CuePlayer::new(
            build_table(PACK),
            pool,
            MockVoice::typewriter(voices.clone()),
            SoundSlice::from_millis(0, 5),
        );
        let render_handle = render.clone().unwrap_or_default();
        let commands_handle = commands.clone().unwrap_or_default();
        let mut session = TerminalSession::new(
            test_config(max_visual_lines),
            render,
            MockLayout { width },
            commands,
            cues,
        );
        session.init();
        Harness {
            session,
            render: render_handle,
            commands: commands_handle,
            voices,
        }
    }

    fn harness(commands: MockCommands) -> Harness {
        harness_with(Some(commands), Some(MockRender::default()), 100, 80)
    }

    fn type_text(session: &mut TestSession, text: &str) {
        for ch in text.chars() {
            session.on_character(ch);
        }
    }

    fn lines(session: &TestSession) -> Vec<String> {
        session.scrollback().lines().map(str::to_string).collect()
    }

    fn typewriter_plays(log: &VoiceLog) -> usize {
        log.ops()
            .iter()
            .filter(|op| **op == VoiceOp::Play(None))
            .count()
    }

    // =========================================================================
    // Tests: init / render
    // =========================================================================

    #[test]
    fn init_publishes_prompt_with_cursor() {
        let h = harness(MockCommands::default());
        assert_eq!(h.render.last().as_deref(), Some("> _"));
        assert_eq!(h.session.state(), SessionState::Idle);
        assert!(h.session.is_attached());
    }

    #[test]
    fn events_before_init_are_ignored() {
        let mut session: TestSession = TerminalSession::new(
            test_config(10),
            Some(MockRender::default()),
            MockLayout { width: 80 },
            None,
            CuePlayer::new(
                build_table(PACK),
                Vec::new(),
                MockVoice::typewriter(VoiceLog::new()),
                SoundSlice::from_millis(0, 5),
            ),
        );
        assert!(!session.on_character('A'));
        session.on_submit();
        assert!(session.scrollback().is_empty());
    }

    #[test]
    fn missing_render_target_is_tolerated() {
        let mut h = harness_with(Some(MockCommands::default()), None, 100, 80);
        type_text(&mut h.session, "hi");
        h.session.on_submit();
        h.session.on_frame(ms(10_000));

        assert_eq!(h.render.count(), 0);
        assert_eq!(h.session.scrollback().last(), Some("I DO NOT UNDERSTAND"));
        assert_eq!(h.session.current_render(), "> HI\nI DO NOT UNDERSTAND\n> _");
    }

    // =========================================================================
    // Tests: on_character / on_backspace
    // =========================================================================

    #[test]
    fn typed_characters_are_uppercased_and_control_chars_dropped() {
        let mut h = harness(MockCommands::default());

        type_text(&mut h.session, "look\t at\u{7} me");
        assert_eq!(h.session.input(), "LOOK AT ME");
        assert_eq!(h.session.state(), SessionState::Typing);
        assert_eq!(h.render.last().as_deref(), Some("> LOOK AT ME_"));
    }

    #[test]
    fn on_character_reports_acceptance() {
        let mut h = harness(MockCommands::default());
        assert!(h.session.on_character('a'));
        assert!(!h.session.on_character('\n'));
    }

    #[test]
    fn backspace_removes_last_character() {
        let mut h = harness(MockCommands::default());
        type_text(&mut h.session, "ab");

        h.session.on_backspace();
        assert_eq!(h.session.input(), "A");
        assert_eq!(h.session.state(), SessionState::Typing);

        h.session.on_backspace();
        h.session.on_backspace();
        assert_eq!(h.session.input(), "");
        assert_eq!(h.session.state(), SessionState::Idle);
    }

    #[test]
    fn cancel_clears_input() {
        let mut h = harness(MockCommands::default());
        type_text(&mut h.session, "abc");

        h.session.on_cancel();
        assert_eq!(h.session.input(), "");
        assert_eq!(h.session.state(), SessionState::Idle);
        assert_eq!(h.render.last().as_deref(), Some("> _"));
    }

    // =========================================================================
    // Tests: on_submit
    // =========================================================================

    #[test]
    fn blank_submit_leaves_bare_prompt_line_without_dispatch() {
        let commands = MockCommands::default();
        let mut h = harness(commands);

        h.session.on_submit();
        type_text(&mut h.session, "   ");
        h.session.on_submit();

        assert_eq!(lines(&h.session), vec!["> ", "> "]);
        assert!(h.commands.calls().is_empty());
        assert_eq!(h.session.state(), SessionState::Idle);
        assert_eq!(h.session.input(), "");
    }

    #[test]
    fn submit_dispatches_trimmed_uppercase_command() {
        let mut h = harness(MockCommands::default().with("HELLO", "HI THERE"));

        type_text(&mut h.session, "  hello ");
        h.session.on_submit();

        assert_eq!(h.commands.calls(), vec!["HELLO"]);
        assert_eq!(lines(&h.session), vec!["> HELLO"]);
        assert_eq!(h.session.state(), SessionState::Revealing);
        assert_eq!(h.session.input(), "");
        // Prompt and cursor are hidden while revealing.
        assert_eq!(h.session.current_render(), "> HELLO\n");
    }

    #[test]
    fn empty_response_reveals_fallback_text() {
        let mut h = harness(MockCommands::default().with("XYZZY", ""));

        type_text(&mut h.session, "xyzzy");
        h.session.on_submit();
        h.session.on_frame(ms(10_000));

        assert_eq!(lines(&h.session), vec!["> XYZZY", "I DO NOT UNDERSTAND"]);
        assert_eq!(h.session.state(), SessionState::Idle);
    }

    #[test]
    fn unknown_command_reveals_fallback_text() {
        let mut h = harness(MockCommands::default());

        type_text(&mut h.session, "dance");
        h.session.on_submit();
        h.session.on_frame(ms(10_000));

        assert_eq!(h.session.scrollback().last(), Some("I DO NOT UNDERSTAND"));
    }

    #[test]
    fn missing_dispatcher_reveals_fallback_text() {
        let mut h = harness_with(None, Some(MockRender::default()), 100, 80);

        type_text(&mut h.session, "help");
        h.session.on_submit();
        h.session.on_frame(ms(10_000));

        assert_eq!(h.session.scrollback().last(), Some("I DO NOT UNDERSTAND"));
    }

    // =========================================================================
    // Tests: reveal timing
    // =========================================================================

    #[test]
    fn reveal_waits_response_delay_then_types_one_char_per_delay() {
        let mut h = harness(MockCommands::default().with("HI", "OK"));
        type_text(&mut h.session, "hi");
        h.session.on_submit();

        h.session.on_frame(ms(99));
        assert_eq!(lines(&h.session), vec!["> HI"]);

        h.session.on_frame(ms(100));
        assert_eq!(lines(&h.session), vec!["> HI", "O"]);
        assert_eq!(h.render.last().as_deref(), Some("> HI\nO\n"));

        h.session.on_frame(ms(109));
        assert_eq!(h.session.scrollback().last(), Some("O"));

        h.session.on_frame(ms(110));
        assert_eq!(h.session.scrollback().last(), Some("OK"));
        assert_eq!(h.session.state(), SessionState::Revealing);

        h.session.on_frame(ms(120));
        assert_eq!(h.session.state(), SessionState::Idle);
        assert_eq!(h.session.current_render(), "> HI\nOK\n> _");
    }

    #[test]
    fn reveal_plays_one_typewriter_cue_per_character() {
        let mut h = harness(MockCommands::default().with("HI", "OK!"));
        type_text(&mut h.session, "hi");
        h.session.on_submit();
        h.session.on_frame(ms(10_000));

        assert_eq!(typewriter_plays(&h.voices), 3);
    }

    #[test]
    fn newline_in_response_opens_a_new_line() {
        let mut h = harness(MockCommands::default().with("DIR", "A\r\nB"));
        type_text(&mut h.session, "dir");
        h.session.on_submit();
        h.session.on_frame(ms(10_000));

        assert_eq!(lines(&h.session), vec!["> DIR", "A", "B"]);
        assert_eq!(typewriter_plays(&h.voices), 2);
    }

    #[test]
    fn new_reveal_cancels_the_one_in_flight() {
        let mut h = harness(MockCommands::default().with("GO", "AAAA"));
        type_text(&mut h.session, "go");
        h.session.on_submit();
        h.session.on_frame(ms(110));
        assert_eq!(h.session.scrollback().last(), Some("AA"));

        h.session.reveal("BBB");
        h.session.on_frame(ms(10_000));

        assert_eq!(lines(&h.session), vec!["> GO", "AA", "BBB"]);
        assert_eq!(h.session.state(), SessionState::Idle);
        // Two from A, three from B, none afterwards.
        assert_eq!(typewriter_plays(&h.voices), 5);
    }

    // =========================================================================
    // Tests: input while revealing
    // =========================================================================

    #[test]
    fn editing_and_submit_are_ignored_while_revealing() {
        let mut h = harness(MockCommands::default().with("GO", "DONE"));
        type_text(&mut h.session, "go");
        h.session.on_submit();
        let before = lines(&h.session);

        assert!(!h.session.on_character('x'));
        h.session.on_backspace();
        h.session.on_submit();

        assert_eq!(h.session.input(), "");
        assert_eq!(lines(&h.session), before);
        assert_eq!(h.commands.calls(), vec!["GO"]);
        assert_eq!(h.session.state(), SessionState::Revealing);
    }

    #[test]
    fn cancel_still_clears_input_while_revealing() {
        let mut h = harness(MockCommands::default());
        type_text(&mut h.session, "ab");
        h.session.reveal("WAIT");
        assert_eq!(h.session.input(), "AB");

        h.session.on_cancel();
        assert_eq!(h.session.input(), "");
        assert_eq!(h.session.state(), SessionState::Revealing);

        h.session.on_frame(ms(10_000));
        assert_eq!(h.session.state(), SessionState::Idle);
        assert_eq!(h.session.scrollback().last(), Some("WAIT"));
    }

    #[test]
    fn reveal_returns_to_typing_when_input_survived() {
        let mut h = harness(MockCommands::default());
        type_text(&mut h.session, "ab");
        h.session.reveal("X");
        h.session.on_frame(ms(10_000));

        assert_eq!(h.session.state(), SessionState::Typing);
        assert_eq!(h.session.current_render(), "X\n> AB_");
    }

    // =========================================================================
    // Tests: scrollback eviction
    // =========================================================================

    #[test]
    fn scrollback_never_exceeds_visual_line_maximum() {
        let mut h = harness_with(Some(MockCommands::default()), Some(MockRender::default()), 5, 80);
        let layout = MockLayout { width: 80 };

        for i in 0..20 {
            type_text(&mut h.session, &format!("cmd{i}"));
            h.session.on_submit();
            assert!(layout.visual_line_count(h.session.current_render()) <= 5);
            for step in 0..30 {
                h.session.on_frame(ms(i * 1_000 + step * 10));
                assert!(layout.visual_line_count(h.session.current_render()) <= 5);
            }
            h.session.on_frame(ms(i * 1_000 + 999));
        }

        assert_eq!(h.session.scrollback().last(), Some("I DO NOT UNDERSTAND"));
        assert!(h.session.scrollback().len() <= 4);
    }

    #[test]
    fn eviction_counts_wrapped_lines() {
        // 10 columns: the fallback text wraps onto two visual lines.
        let mut h = harness_with(Some(MockCommands::default()), Some(MockRender::default()), 4, 10);
        type_text(&mut h.session, "a");
        h.session.on_submit();
        h.session.on_frame(ms(10_000));
        // "> A" (1) + fallback (2) + prompt (1) = 4
        assert_eq!(h.session.scrollback().len(), 2);

        type_text(&mut h.session, "b");
        h.session.on_submit();
        h.session.on_frame(ms(20_000));

        // "> A" had to go to make room for the second exchange.
        assert_eq!(lines(&h.session), vec!["> B", "I DO NOT UNDERSTAND"]);
    }

    #[test]
    fn oldest_lines_are_evicted_first() {
        let mut h = harness_with(Some(MockCommands::default()), Some(MockRender::default()), 3, 80);
        h.session.on_submit();
        type_text(&mut h.session, "1");
        h.session.on_submit();
        h.session.on_frame(ms(10_000));

        assert_eq!(lines(&h.session), vec!["> 1", "I DO NOT UNDERSTAND"]);
    }

    // =========================================================================
    // Tests: cursor blink
    // =========================================================================

    #[test]
    fn cursor_blinks_on_interval() {
        let mut h = harness(MockCommands::default());
        assert!(h.session.cursor_visible());

        h.session.on_frame(ms(499));
        assert!(h.session.cursor_visible());

        h.session.on_frame(ms(500));
        assert!(!h.session.cursor_visible());
        assert_eq!(h.render.last().as_deref(), Some("> "));

        h.session.on_frame(ms(1000));
        assert!(h.session.cursor_visible());
        assert_eq!(h.render.last().as_deref(), Some("> _"));
    }

    #[test]
    fn zero_blink_interval_keeps_cursor_on() {
        let voices = VoiceLog::new();
        let mut config = test_config(10);
        config.blink_interval = Duration::ZERO;
        let mut session: TestSession = TerminalSession::new(
            config,
            Some(MockRender::default()),
            MockLayout { width: 80 },
            None,
            CuePlayer::new(
                build_table(PACK),
                Vec::new(),
                MockVoice::typewriter(voices),
                SoundSlice::from_millis(0, 5),
            ),
        );
        session.init();
        session.on_frame(ms(5_000));
        assert!(session.cursor_visible());
    }

    // =========================================================================
    // Tests: keystroke cues
    // =========================================================================

    #[test]
    fn key_press_plays_cue_on_next_frame() {
        let mut h = harness(MockCommands::default());

        h.session.on_key_down(ScanCode::new(30), false);
        assert!(h.voices.ops().is_empty());

        h.session.on_frame(ms(16));
        assert_eq!(
            h.voices.ops(),
            vec![VoiceOp::Seek(Some(0), ms(100)), VoiceOp::Play(Some(0))]
        );
    }

    #[test]
    fn key_repeat_does_not_retrigger_cue() {
        let mut h = harness(MockCommands::default());

        h.session.on_key_down(ScanCode::new(30), false);
        h.session.on_key_down(ScanCode::new(30), true);
        h.session.on_key_down(ScanCode::new(30), true);
        h.session.on_frame(ms(16));

        let plays = h
            .voices
            .ops()
            .iter()
            .filter(|op| matches!(op, VoiceOp::Play(Some(_))))
            .count();
        assert_eq!(plays, 1);
    }

    #[test]
    fn key_presses_during_reveal_are_silent() {
        let mut h = harness(MockCommands::default());
        h.session.reveal("LONG RESPONSE");

        h.session.on_key_down(ScanCode::new(30), false);
        h.session.on_frame(ms(16));

        assert!(
            !h.voices
                .ops()
                .iter()
                .any(|op| matches!(op, VoiceOp::Play(Some(_))))
        );
    }

    #[test]
    fn submit_key_press_is_silent_once_reveal_starts() {
        let mut h = harness(MockCommands::default());
        type_text(&mut h.session, "x");

        h.session.on_key_down(ScanCode::new(28), false);
        h.session.on_submit();
        h.session.on_frame(ms(16));

        assert_eq!(h.session.state(), SessionState::Revealing);
        assert!(
            !h.voices
                .ops()
                .iter()
                .any(|op| matches!(op, VoiceOp::Play(Some(_))))
        );
    }

    #[test]
    fn key_cue_lasts_its_full_slice_from_the_frame_it_starts() {
        let mut h = harness(MockCommands::default());
        h.session.on_frame(ms(500));

        h.session.on_key_down(ScanCode::new(30), false);
        h.session.on_frame(ms(540));
        h.session.on_frame(ms(560));
        assert!(h.session.cue_player().voices()[0].is_playing());
        assert!(!h.voices.ops().contains(&VoiceOp::Stop(Some(0))));

        // 50ms slice started at 540.
        h.session.on_frame(ms(589));
        assert!(h.session.cue_player().voices()[0].is_playing());
        h.session.on_frame(ms(590));
        assert!(!h.session.cue_player().voices()[0].is_playing());
    }

    #[test]
    fn unknown_key_still_makes_a_sound() {
        let mut h = harness(MockCommands::default());
        h.session.on_key_down(ScanCode::UNMAPPED, false);
        h.session.on_frame(ms(16));

        assert_eq!(h.voices.ops()[0], VoiceOp::Seek(Some(0), ms(100)));
    }

    #[test]
    fn handle_input_routes_events() {
        let mut h = harness(MockCommands::default().with("A", "B"));
        h.session.handle_input(InputEvent::KeyDown {
            scan_code: ScanCode::new(30),
            is_repeat: false,
        });
        h.session.handle_input(InputEvent::Character('a'));
        h.session.handle_input(InputEvent::Character('c'));
        h.session.handle_input(InputEvent::Backspace);
        h.session.handle_input(InputEvent::Submit);

        assert_eq!(h.commands.calls(), vec!["A"]);
        h.session.handle_input(InputEvent::Cancel);
        h.session.on_frame(ms(10_000));
        assert_eq!(lines(&h.session), vec!["> A", "B"]);
    }

    // =========================================================================
    // Tests: teardown
    // =========================================================================

    #[test]
    fn teardown_stops_timers_and_detaches() {
        let mut h = harness(MockCommands::default().with("GO", "SOMETHING LONG"));
        type_text(&mut h.session, "go");
        h.session.on_submit();
        h.session.on_frame(ms(120));

        h.session.teardown();
        let renders = h.render.count();
        let scrollback = lines(&h.session);

        h.session.on_frame(ms(60_000));
        assert!(!h.session.on_character('x'));
        h.session.reveal("MORE");

        assert_eq!(h.render.count(), renders);
        assert_eq!(lines(&h.session), scrollback);
        assert!(!h.session.is_attached());
        assert!(!h.session.cue_player().typewriter_voice().is_playing());
    }
}
