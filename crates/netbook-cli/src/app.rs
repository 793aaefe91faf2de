//! Application state machine and key dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use netbook_core::{Contact, ContactStorage, Snapshot, VersionedStore};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::command::Command;

// ─── Mode ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Keys go into the command line.
  Command,
  /// Keys go into the quick filter.
  Search,
}

// ─── Row ─────────────────────────────────────────────────────────────────────

/// One visible contact with the 1-based number commands use to address it.
#[derive(Debug, Clone)]
pub struct Row {
  pub number:  usize,
  pub contact: Arc<Contact>,
}

// ─── App ─────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S> {
  pub store:   VersionedStore,
  storage:     S,
  changes:     watch::Receiver<Snapshot>,

  /// The store's visible contacts, cached between changes.
  pub rows: Vec<Row>,

  pub mode: Mode,

  /// Text typed on the command line.
  pub input: String,

  /// Fuzzy filter over names. Display only; the store never sees it.
  pub quick_filter: String,

  /// Cursor position within the quick-filtered rows.
  pub list_cursor: usize,

  /// Result of the last command, shown in the status bar.
  pub status_msg: String,
  pub status_err: bool,
}

impl<S: ContactStorage> App<S> {
  pub fn new(store: VersionedStore, storage: S) -> Self {
    let changes = store.subscribe();
    let mut app = Self {
      store,
      storage,
      changes,
      rows: Vec::new(),
      mode: Mode::Command,
      input: String::new(),
      quick_filter: String::new(),
      list_cursor: 0,
      status_msg: String::new(),
      status_err: false,
    };
    app.refresh();
    app
  }

  // ── Rows ─────────────────────────────────────────────────────────────────

  /// Rebuild the cached rows from the store's current view.
  pub fn refresh(&mut self) {
    self.rows = self
      .store
      .visible()
      .into_iter()
      .enumerate()
      .map(|(i, contact)| Row { number: i + 1, contact })
      .collect();
    let len = self.filtered_rows().len();
    self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
  }

  /// Refresh if the store has moved to a new snapshot since the last call.
  pub fn sync(&mut self) -> bool {
    let changed = self.changes.has_changed().unwrap_or(false);
    if changed {
      self.changes.borrow_and_update();
      self.refresh();
    }
    changed
  }

  /// Rows whose name fuzzy-matches the quick filter.
  pub fn filtered_rows(&self) -> Vec<&Row> {
    if self.quick_filter.is_empty() {
      return self.rows.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .rows
      .iter()
      .filter(|row| {
        matcher
          .fuzzy_match(row.contact.name().as_str(), &self.quick_filter)
          .is_some()
      })
      .collect()
  }

  /// The row under the list cursor, if any.
  pub fn cursor_row(&self) -> Option<&Row> {
    self.filtered_rows().get(self.list_cursor).copied()
  }

  // ── Commands ─────────────────────────────────────────────────────────────

  /// Parse and run the command line. Returns `false` when the user exits.
  pub fn submit(&mut self) -> bool {
    let line = std::mem::take(&mut self.input);
    if line.trim().is_empty() {
      return true;
    }
    debug!(command = %line, "submitting");

    let result = Command::parse(&line)
      .and_then(|cmd| cmd.execute(&mut self.store, &self.storage));
    let keep_running = match result {
      Ok(outcome) => {
        self.status_msg = outcome.message;
        self.status_err = false;
        !outcome.exit
      }
      Err(e) => {
        warn!(command = %line, error = %e, "command failed");
        self.status_msg = e.to_string();
        self.status_err = true;
        // Leave the line in place so it can be fixed.
        self.input = line;
        true
      }
    };

    // Filter and sort changes do not produce a snapshot.
    if !self.sync() {
      self.refresh();
    }
    keep_running
  }

  // ── Key handling ─────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.mode {
      Mode::Search => {
        self.handle_search_key(key);
        true
      }
      Mode::Command => self.handle_command_key(key),
    }
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.mode = Mode::Command;
        self.quick_filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.mode = Mode::Command;
      }
      KeyCode::Backspace => {
        self.quick_filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.quick_filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  fn handle_command_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Enter => return self.submit(),
      KeyCode::Esc => {
        self.input.clear();
        self.quick_filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Backspace => {
        self.input.pop();
      }

      // Navigation
      KeyCode::Down => self.move_cursor(1),
      KeyCode::Up => self.move_cursor(-1),
      KeyCode::PageDown => self.move_cursor(10),
      KeyCode::PageUp => self.move_cursor(-10),

      // Quick filter, only from an empty command line
      KeyCode::Char('/') if self.input.is_empty() => {
        self.mode = Mode::Search;
        self.quick_filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => self.input.push(c),

      _ => {}
    }
    true
  }

  fn move_cursor(&mut self, delta: isize) {
    let len = self.filtered_rows().len();
    if len == 0 {
      return;
    }
    self.list_cursor = self
      .list_cursor
      .saturating_add_signed(delta)
      .min(len - 1);
  }
}
