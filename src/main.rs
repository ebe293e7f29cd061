mod domain;
mod usecase;
mod interface_adapter;
mod infrastructure;
mod shared;

use crate::domain::primitive::SoundSlice;
use crate::infrastructure::audio::{self, AudioOutput};
use crate::infrastructure::command::BuiltinCommands;
use crate::infrastructure::tui::app_runner;
use crate::infrastructure::tui::screen_buffer::ScreenBuffer;
use crate::interface_adapter::adapter::{layout_adapter_factory, voice_adapter_factory};
use crate::interface_adapter::controller::session_controller::SessionController;
use crate::shared::config::Settings;
use crate::usecase::cue_player::CuePlayer;
use crate::usecase::terminal_session::{SessionConfig, TerminalSession};

fn main() -> anyhow::Result<()> {
    shared::logging::init();
    let settings = Settings::discover()?;

    // Audio: a missing device or asset degrades to silence, never to an error
    let output = AudioOutput::open()
        .inspect_err(|e| tracing::error!("{}", e))
        .ok();
    let assets = audio::load_cue_assets(&settings.audio);
    let voices =
        voice_adapter_factory::create_voice_pool(output.as_ref(), &assets.key_sheet, settings.voice_count);
    let typewriter = voice_adapter_factory::create_voice(output.as_ref(), assets.typewriter_sheet);
    let cues = CuePlayer::new(
        assets.table,
        voices,
        typewriter,
        SoundSlice::from_millis(
            settings.audio.typewriter_start_ms,
            settings.audio.typewriter_duration_ms,
        ),
    );

    // Infrastructure concrete adapters
    let screen = ScreenBuffer::new();
    let (layout_adapter, wrap_width) = layout_adapter_factory::create_layout_adapter(80);

    // Usecase (depends on port traits via generics)
    let session = TerminalSession::new(
        SessionConfig::from(&settings),
        Some(screen.clone()),
        layout_adapter,
        Some(BuiltinCommands::new()),
        cues,
    );

    // Controller
    let controller = SessionController::new(session);

    // Run TUI
    app_runner::run(controller, screen, wrap_width)?;

    Ok(())
}
