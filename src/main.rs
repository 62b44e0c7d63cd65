//! block-game - terminal frontend for the falling-block engine
//!
//! Arrow keys move and rotate the piece; a timer drops it.
//! `--headless` reads commands from stdin instead.

mod headless;
mod input;
mod ui;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use input::InputHandler;
use ratatui::{Terminal, backend::CrosstermBackend};
use rust_block_game::game::{DownResult, Game};
use rust_block_game::settings::Settings;
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

#[derive(Debug, Parser)]
#[command(name = "block-game")]
#[command(about = "Falling-block puzzle in the terminal")]
struct Options {
    /// Read commands from stdin and print JSON snapshots instead of drawing
    #[arg(long)]
    headless: bool,
    /// Settings file to use instead of the per-user one
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Get the temp directory for log files, creating it if needed
fn log_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("block-game");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let options = Options::parse();

    let session_id: u32 = rand::random();
    let log_dir = log_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Log to a file so the terminal UI stays clean
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_block_game=debug,block_game=debug".into()),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "block-game starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = match &options.config {
        Some(path) => Settings::load_from(path),
        None => {
            let settings = Settings::load();
            // First run: write the defaults out so they can be edited
            if Settings::settings_path().is_some_and(|path| !path.exists()) {
                if let Err(e) = settings.save() {
                    tracing::warn!("Could not save default settings: {}", e);
                }
            }
            settings
        }
    };

    let mut game = Game::new(settings.game_config())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    if options.headless {
        let stdin = io::stdin();
        return headless::run(&mut game, stdin.lock(), stdout().lock());
    }

    game.spawn_test_mino();

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut game, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if result.is_ok() {
        println!("Lines: {} | Pieces: {}", game.lines_cleared(), game.pieces_locked());
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    settings: &Settings,
) -> io::Result<()> {
    let mut input = InputHandler::from_settings(settings);
    let gravity = Duration::from_millis(settings.gameplay.gravity_ms.max(1));
    let mut last_fall = Instant::now();

    loop {
        terminal.draw(|frame| ui::render_game(frame, game, settings))?;

        // Handle input
        if event::poll(FRAME_DURATION)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Release => input.key_up(key),
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    for action in input.key_down(key) {
                        if !action.apply(game) {
                            tracing::info!("Quit requested");
                            return Ok(());
                        }
                        if action == input::Action::MoveDown || action == input::Action::Restart {
                            last_fall = Instant::now();
                        }
                    }
                }
                _ => {}
            }
        }

        // Held keys for DAS/ARR
        for action in input.update() {
            action.apply(game);
        }

        // Gravity
        if last_fall.elapsed() >= gravity {
            if let DownResult::Locked { lines_cleared } = game.move_down() {
                tracing::debug!(lines_cleared, "gravity lock");
            }
            last_fall = Instant::now();
        }
    }
}
