//! Contact list pane, left panel.

use netbook_core::ContactStorage;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, Mode};

/// Render the contact list into `area`.
pub fn draw<S: ContactStorage>(f: &mut Frame, area: Rect, app: &App<S>) {
  let filtered = app.filtered_rows();
  let total = app.rows.len();
  let searching = app.mode == Mode::Search || !app.quick_filter.is_empty();

  let mut title = if searching {
    format!(" Contacts ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Contacts ({total}) ")
  };
  if !app.store.filter().is_all() {
    title.push_str("[filtered] ");
  }

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|row| {
      let mut spans = vec![
        Span::styled(format!("{:>3}. ", row.number), Style::default().fg(Color::DarkGray)),
        Span::raw(row.contact.name().to_string()),
      ];
      if let Some(p) = row.contact.priority() {
        spans.push(Span::styled(format!("  [{p}]"), Style::default().fg(Color::Yellow)));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  if searching && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.mode == Mode::Search {
      format!("/{}_", app.quick_filter)
    } else {
      format!("/{}", app.quick_filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let mut state = ListState::default();
  state.select((!filtered.is_empty()).then_some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}
