use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::infrastructure::layout::WrapWidth;
use crate::infrastructure::tui::input::InputHandler;
use crate::infrastructure::tui::screen_buffer::ScreenBuffer;
use crate::infrastructure::tui::widgets::{layout, screen_view};
use crate::interface_adapter::controller::session_controller::{AppAction, SessionController};
use crate::interface_adapter::port::{CommandPort, RenderPort, TextLayoutPort, VoicePort};

/// Upper bound on how long one loop iteration waits for input (~60 fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Main TUI event loop.
///
/// Initializes crossterm raw mode + alternate screen, creates the ratatui
/// Terminal, runs the draw -> poll -> input -> frame loop, and cleans up on exit.
pub fn run<R, L, D, V>(
    mut controller: SessionController<R, L, D, V>,
    screen: ScreenBuffer,
    wrap_width: WrapWidth,
) -> anyhow::Result<()>
where
    R: RenderPort,
    L: TextLayoutPort,
    D: CommandPort,
    V: VoicePort,
{
    // === Initialization ===
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Press/repeat/release reporting lets auto-repeat be told apart exactly.
    let reports_event_kinds = matches!(supports_keyboard_enhancement(), Ok(true));
    if reports_event_kinds {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    tracing::info!(reports_event_kinds, "TUI started");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut input_handler = InputHandler::new(reports_event_kinds);

    // === Main loop ===
    let result = main_loop(
        &mut terminal,
        &mut controller,
        &mut input_handler,
        &screen,
        &wrap_width,
    );

    // === Cleanup (always runs) ===
    controller.dispatch(AppAction::Quit);
    if reports_event_kinds {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

fn main_loop<R, L, D, V>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut SessionController<R, L, D, V>,
    input_handler: &mut InputHandler,
    screen: &ScreenBuffer,
    wrap_width: &WrapWidth,
) -> anyhow::Result<()>
where
    R: RenderPort,
    L: TextLayoutPort,
    D: CommandPort,
    V: VoicePort,
{
    let started = Instant::now();

    loop {
        // 1. Keep the wrap width in step with the drawn area so eviction
        //    counts the same rows the screen shows
        let size = terminal.size()?;
        let areas = layout::compute_layout(Rect::new(0, 0, size.width, size.height));
        if wrap_width.set(screen_view::inner_area(areas.screen).width) {
            controller.dispatch(AppAction::Relayout);
        }

        // 2. Draw
        let text = screen.snapshot();
        let state = controller.session().state();
        terminal.draw(|frame| {
            let areas = layout::compute_layout(frame.area());
            screen_view::render(frame, areas.screen, &text);
            screen_view::render_status(frame, areas.status, state);
        })?;

        // 3. Drain input (waits at most one frame)
        if event::poll(FRAME_INTERVAL)? {
            loop {
                if let Event::Key(key) = event::read()? {
                    for action in input_handler.handle_key(key, Instant::now()) {
                        if action == AppAction::Quit {
                            return Ok(());
                        }
                        controller.dispatch(action);
                    }
                }
                // Resize is picked up by step 1 on the next iteration
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        // 4. Frame tick: keystroke cues, blink, reveal steps, voice auto-stops
        controller.dispatch(AppAction::Frame(started.elapsed()));
    }
}
