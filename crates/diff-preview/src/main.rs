use anyhow::{Context, Result};
use clap::Parser;
use diff_pipeline::{
    DiffOptions, FilePresetLoader, Orchestrator, ParseWorker, PipelineState, ViewType,
};
use diff_preview_config::AppConfig;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::sync::{mpsc::channel, Arc};
use std::time::Duration;

mod app;
mod cli;
mod keymap;
mod logger;
mod theme;
mod views;

use app::App;
use cli::Args;
use theme::Theme;

fn main() -> Result<()> {
    let args = Args::parse();
    let log_file = logger::init()?;

    log::info!("Starting diff-preview (log: {})", log_file.display());

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    let input = args.initial_input()?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    let (outcome_tx, outcome_rx) = channel();
    let worker = ParseWorker::spawn(outcome_tx).context("Failed to spawn parse worker")?;
    let orchestrator = Orchestrator::new(worker, initial_state(&args, &config));
    let loader = Arc::new(FilePresetLoader::new(&config.preset_dir));

    let mut app = App::new(orchestrator, outcome_rx, loader, runtime.handle().clone())
        .with_text_sources(args.text_sources());
    app.start(input);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.into_orchestrator().into_dispatcher().shutdown();
    runtime.shutdown_timeout(Duration::from_millis(200));

    if let Err(err) = &result {
        log::error!("Exiting with error: {:#}", err);
    }

    log::info!("Exiting diff-preview");
    result
}

fn initial_state(args: &Args, config: &AppConfig) -> PipelineState {
    let options = DiffOptions {
        zip_nearby_sequences: config.zip_nearby_sequences && !args.no_zip,
    };

    let view_type = if args.unified {
        ViewType::Unified
    } else {
        config.view_type.parse().unwrap_or_else(|e| {
            log::warn!("{}, using split view", e);
            ViewType::Split
        })
    };

    PipelineState::new(options, view_type, config.hide_gutter || args.hide_gutter)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<ParseWorker>,
) -> Result<()> {
    let theme = Theme::default();

    loop {
        app.pump();

        let size = terminal.size()?;
        let content_height = views::content_height(app.orchestrator().state());
        app.sync_viewport(content_height, views::body_height(size.height));

        terminal.draw(|frame| views::render(app, &theme, frame))?;

        if !app.is_running() {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = keymap::command_for(key) {
                        app.handle_command(command);
                    }
                }
            }
        }
    }

    Ok(())
}
