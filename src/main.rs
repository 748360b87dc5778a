mod input;
mod renderer;
mod terminal_runtime;
mod ui;

use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{DEFAULT_GRID, GridSize};
use grid_snake::game::{GameEvent, GameInput, GameSession, GameStatus};
use grid_snake::logging::init_file_logging;
use grid_snake::score::JsonFileStore;
use tracing::{info, warn};

use crate::input::{UiAction, poll_action};
use crate::terminal_runtime::{TerminalSession, restore_terminal};

/// Longest wait for input between frames.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Tick interval change per [+]/[-] press.
const TICK_STEP_MS: u64 = 10;

/// Fallback store directory when the platform has no data directory.
const FALLBACK_DATA_DIR: &str = ".grid-snake";

#[derive(Debug, Parser)]
#[command(version, about = "Classic snake on a grid sized to your terminal")]
struct Cli {
    /// Tick interval in milliseconds (saved as a preference).
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Player name (saved as a preference).
    #[arg(long)]
    name: Option<String>,

    /// Fixed grid width in cells instead of fitting the terminal.
    #[arg(long, requires = "height")]
    width: Option<u16>,

    /// Fixed grid height in cells instead of fitting the terminal.
    #[arg(long, requires = "width")]
    height: Option<u16>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the high score and preference files.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Append structured logs to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file
        && let Err(error) = init_file_logging(path)
    {
        eprintln!("Logging disabled: {error}");
    }

    install_panic_hook();
    run(cli)
}

fn run(cli: Cli) -> io::Result<()> {
    let store = open_store(cli.data_dir.clone());
    let fixed_grid = cli
        .width
        .zip(cli.height)
        .and_then(|(width, height)| GridSize::new(width, height));

    let mut terminal = TerminalSession::enter()?;
    let viewport = terminal.size()?;
    let grid = fixed_grid
        .or_else(|| renderer::grid_for_viewport(viewport.width, viewport.height))
        .unwrap_or(DEFAULT_GRID);

    let mut session = match cli.seed {
        Some(seed) => GameSession::with_seed(grid, store, seed),
        None => GameSession::new(grid, store),
    };
    if let Some(tick_ms) = cli.tick_ms {
        session.set_tick_interval(tick_ms);
    }
    if let Some(name) = &cli.name {
        session.set_player_name(name);
    }
    info!(width = grid.width, height = grid.height, "game ready");

    let clock = Instant::now();
    let mut latest = session.snapshot(clock.elapsed());
    let mut dirty = true;

    loop {
        let now = clock.elapsed();
        session.advance(now);
        for GameEvent::StateChanged(snapshot) in session.drain_events() {
            latest = snapshot;
            dirty = true;
        }

        if dirty {
            terminal
                .terminal_mut()
                .draw(|frame| renderer::render(frame, &latest))?;
            dirty = false;
        }

        let timeout = session
            .next_deadline()
            .map_or(FRAME_INTERVAL, |deadline| {
                deadline.saturating_sub(clock.elapsed()).min(FRAME_INTERVAL)
            });
        let Some(action) = poll_action(timeout)? else {
            continue;
        };

        let now = clock.elapsed();
        match action {
            UiAction::Quit => break,
            UiAction::Turn(direction) => session.handle(GameInput::Turn(direction), now),
            UiAction::TogglePause => session.handle(GameInput::TogglePause, now),
            UiAction::Stop => session.handle(GameInput::Stop, now),
            UiAction::Confirm => {
                if matches!(session.status(), GameStatus::Idle | GameStatus::GameOver) {
                    let name = session.preferences().player_name.clone();
                    session.handle(GameInput::Start { name }, now);
                }
            }
            UiAction::Faster | UiAction::Slower => {
                let current = session.preferences().tick_interval_ms;
                let requested = if action == UiAction::Faster {
                    current.saturating_sub(TICK_STEP_MS)
                } else {
                    current.saturating_add(TICK_STEP_MS)
                };
                if session.set_tick_interval(requested) {
                    latest = session.snapshot(now);
                    dirty = true;
                }
            }
            UiAction::Resize { cols, rows } => {
                if fixed_grid.is_none()
                    && let Some(grid) = renderer::grid_for_viewport(cols, rows)
                {
                    session.handle(
                        GameInput::Resize {
                            width: grid.width,
                            height: grid.height,
                        },
                        now,
                    );
                }
                dirty = true;
            }
        }
    }

    info!(
        high_score = session.high_score().score,
        holder = %session.high_score().name,
        "game closed"
    );
    Ok(())
}

fn open_store(data_dir: Option<PathBuf>) -> JsonFileStore {
    if let Some(dir) = data_dir {
        return JsonFileStore::new(dir);
    }

    JsonFileStore::in_data_dir().unwrap_or_else(|error| {
        warn!(%error, fallback = FALLBACK_DATA_DIR, "using fallback data directory");
        JsonFileStore::new(FALLBACK_DATA_DIR)
    })
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
