use std::io::{self, stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use steep::app::LogicThread;
use steep::config::Config;
use steep::render::RenderState;
use steep::store::TeaStore;
use steep::theme::Theme;
use steep::{slog, ui, Result};

const FRAME_DURATION: Duration = Duration::from_micros(16_666); // 60fps
/// Cadence of the pulse animation while preparing or finished.
const PULSE_INTERVAL: Duration = Duration::from_millis(400);

/// steep - a terminal timer for the brewery of excellent tea
#[derive(Parser, Debug)]
#[command(name = "steep")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    STEEP_DEBUG=1     Enable debug logging (alternative to --debug)")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.steep/steep.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Write the default config, theme, and tea store for a fresh install
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Restore the stored teas to the built-in defaults
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    steep::log::init_with_debug(cli.debug);

    match cli.command {
        Some(Command::Init { force }) => {
            return run_init(force);
        }
        Some(Command::Reset) => {
            return run_reset();
        }
        None => {
            // No subcommand: launch the TUI
        }
    }

    slog!("steep starting");

    let config = Config::load()?;
    // The theme file is required; a missing one aborts startup here.
    let theme = Theme::load()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let logic_handle =
        thread::spawn(move || LogicThread::run(config, theme, state_tx, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let _ = logic_handle.join();
    restore_terminal(&mut terminal)?;
    result
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let mut last_frame = Instant::now();
    let mut dirty = true;

    let mut pulse = false;
    let mut last_pulse = Instant::now();

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        // Pulse cadence for the animated phases; otherwise settle bright.
        if state.phase.is_animated() {
            if last_pulse.elapsed() >= PULSE_INTERVAL {
                pulse = !pulse;
                last_pulse = Instant::now();
                dirty = true;
            }
        } else if pulse {
            pulse = false;
            dirty = true;
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        if dirty {
            terminal.draw(|f| ui::draw(f, &state, pulse))?;
            last_version = state.version;
            dirty = false;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}

/// Write the default config, theme, and tea store. Existing files are
/// left alone unless `--force` is given.
fn run_init(force: bool) -> Result<()> {
    slog!("Init command (force={})", force);
    Config::ensure_dirs()?;

    let theme_path = Config::theme_path()?;
    if !theme_path.exists() || force {
        Theme::write_default(&theme_path, true)?;
        println!("Wrote {}", theme_path.display());
    } else {
        println!("Kept existing {}", theme_path.display());
    }

    let config_path = Config::config_path()?;
    if !config_path.exists() || force {
        Config::default().save()?;
        println!("Wrote {}", config_path.display());
    } else {
        println!("Kept existing {}", config_path.display());
    }

    let teas_path = Config::teas_path()?;
    if !teas_path.exists() || force {
        TeaStore::default().save_sync()?;
        println!("Wrote {}", teas_path.display());
    } else {
        println!("Kept existing {}", teas_path.display());
    }

    Ok(())
}

/// Restore the built-in two-tea defaults.
fn run_reset() -> Result<()> {
    slog!("Reset command");
    TeaStore::default().save_sync()?;
    let path = Config::teas_path()?;
    println!("Tea store restored to defaults: {}", path.display());
    Ok(())
}
