//! `netbook`: terminal UI for the netbook contact store.
//!
//! # Usage
//!
//! ```
//! netbook
//! netbook --config ~/.config/netbook/netbook.toml --data ~/contacts.json
//! RUST_LOG=debug netbook --log /tmp/netbook.log
//! ```

mod app;
mod command;
mod error;
mod settings;
mod ui;

use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use netbook_core::VersionedStore;
use netbook_store_json::JsonStore;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "netbook", version, about = "Terminal UI for the netbook contact store")]
struct Args {
  /// Path to a TOML config file (data_path, log_path, history_limit).
  #[arg(short, long, value_name = "FILE", default_value = "netbook.toml")]
  config: PathBuf,

  /// Contact file to load and save.
  #[arg(long, value_name = "FILE")]
  data: Option<PathBuf>,

  /// File that receives log output.
  #[arg(long, value_name = "FILE")]
  log: Option<PathBuf>,

  /// Maximum number of undo snapshots to keep.
  #[arg(long, value_name = "N")]
  history_limit: Option<usize>,
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();

  // Flags override the environment, which overrides the config file.
  let mut settings = Settings::load(&args.config)?;
  if let Some(data) = args.data {
    settings.data_path = data;
  }
  if let Some(log) = args.log {
    settings.log_path = log;
  }
  if args.history_limit.is_some() {
    settings.history_limit = args.history_limit;
  }

  init_tracing(&settings)?;

  let storage = JsonStore::new(&settings.data_path);
  let initial = storage
    .load_or_default()
    .with_context(|| format!("failed to load contacts from {}", settings.data_path.display()))?;
  let store = VersionedStore::with_config(initial, settings.store_config());
  let mut app = App::new(store, storage);

  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app);

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  tracing::info!("exiting");
  run_result
}

/// Log to a file; the terminal belongs to the UI.
fn init_tracing(settings: &Settings) -> Result<()> {
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(&settings.log_path)
    .with_context(|| format!("opening log file {}", settings.log_path.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

// ─── Event loop ──────────────────────────────────────────────────────────────

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<JsonStore>,
) -> Result<()> {
  loop {
    app.sync();
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(100)).context("polling terminal events")? {
      continue;
    }
    match event::read().context("reading terminal event")? {
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      Event::Resize(_, _) => {
        // Terminal will redraw on next iteration.
      }
      _ => {}
    }
  }

  Ok(())
}
