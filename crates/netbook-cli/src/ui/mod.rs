//! TUI rendering. Orchestrates all panes.

pub mod contact_detail;
pub mod contact_list;

use chrono::Local;
use netbook_core::ContactStorage;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Position, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Mode};

// ─── Root draw ───────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S: ContactStorage>(f: &mut Frame, app: &App<S>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(3), // command line
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_input(f, rows[2], app);
  draw_status(f, rows[3], app);
}

// ─── Header ──────────────────────────────────────────────────────────────────

fn draw_header<S: ContactStorage>(f: &mut Frame, area: Rect, app: &App<S>) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let history = format!(
    "  undo {}  redo {}",
    if app.store.can_undo() { "✓" } else { "-" },
    if app.store.can_redo() { "✓" } else { "-" },
  );
  let left = Span::styled(
    " netbook",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let middle = Span::styled(history, Style::default().fg(Color::Gray));
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  let used = (left.width() + middle.width() + right.width()) as u16;
  let pad = area.width.saturating_sub(used);

  let line = Line::from(vec![left, middle, Span::raw(" ".repeat(pad as usize)), right]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Body ────────────────────────────────────────────────────────────────────

fn draw_body<S: ContactStorage>(f: &mut Frame, area: Rect, app: &App<S>) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  contact_list::draw(f, cols[0], app);
  contact_detail::draw(f, cols[1], app);
}

// ─── Command line ────────────────────────────────────────────────────────────

fn draw_input<S: ContactStorage>(f: &mut Frame, area: Rect, app: &App<S>) {
  let focused = app.mode == Mode::Command;
  let block = Block::default()
    .title(" Command ")
    .borders(Borders::ALL)
    .border_style(if focused {
      Style::default().fg(Color::Cyan)
    } else {
      Style::default().fg(Color::DarkGray)
    });
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(app.input.as_str()), inner);

  if focused {
    let x = inner.x + (app.input.chars().count() as u16).min(inner.width.saturating_sub(1));
    f.set_cursor_position(Position::new(x, inner.y));
  }
}

// ─── Status bar ──────────────────────────────────────────────────────────────

fn draw_status<S: ContactStorage>(f: &mut Frame, area: Rect, app: &App<S>) {
  let (mode_label, hints) = match app.mode {
    Mode::Search => ("SEARCH", "Type to filter  Esc clear  Enter keep"),
    Mode::Command => ("COMMAND", "Enter run  ↑↓ select  / quick filter  help  Ctrl-C quit"),
  };

  let (status, status_style) = if app.status_msg.is_empty() {
    (hints.to_owned(), Style::default().fg(Color::DarkGray))
  } else if app.status_err {
    (app.status_msg.clone(), Style::default().fg(Color::Red))
  } else {
    (app.status_msg.clone(), Style::default().fg(Color::Green))
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let line = Line::from(vec![mode_span, Span::styled(format!("  {status}"), status_style)]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
