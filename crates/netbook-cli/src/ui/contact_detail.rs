//! Contact detail pane, right panel.

use netbook_core::{Contact, ContactStorage, UniqueList};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

// ─── Public entry ────────────────────────────────────────────────────────────

/// Render the selected contact into `area`.
pub fn draw<S: ContactStorage>(f: &mut Frame, area: Rect, app: &App<S>) {
  let row = app.cursor_row();
  let title = row
    .map(|r| format!(" {}. {} ", r.number, r.contact.name()))
    .unwrap_or_else(|| " Detail ".to_owned());

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(row) = row else {
    f.render_widget(
      Paragraph::new("No contact selected. Try `create /name NAME`.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  f.render_widget(
    Paragraph::new(contact_lines(&row.contact)).wrap(Wrap { trim: false }),
    inner,
  );
}

// ─── Formatting helpers ──────────────────────────────────────────────────────

/// One line per value. Multi-valued fields number their entries so they can
/// be addressed with `/index`.
fn contact_lines(contact: &Contact) -> Vec<Line<'static>> {
  let mut lines = Vec::new();
  push_list(&mut lines, "phone", contact.phones());
  push_list(&mut lines, "email", contact.emails());
  push_list(&mut lines, "link", contact.links());
  if let Some(g) = contact.graduation() {
    lines.push(field_line("graduation", g.to_string()));
  }
  push_list(&mut lines, "course", contact.courses());
  push_list(&mut lines, "spec", contact.specialisations());
  push_list(&mut lines, "tag", contact.tags());
  if let Some(p) = contact.priority() {
    lines.push(field_line("priority", p.to_string()));
  }

  if lines.is_empty() {
    lines.push(Line::from(Span::styled(
      "No details yet. Use `add INDEX /FIELD VALUE`.",
      Style::default().fg(Color::DarkGray),
    )));
  }
  lines
}

fn push_list<T: ToString>(lines: &mut Vec<Line<'static>>, label: &str, list: &UniqueList<T>) {
  for (i, value) in list.iter().enumerate() {
    let label = if list.len() > 1 { format!("{label} {}", i + 1) } else { label.to_owned() };
    lines.push(field_line(&label, value.to_string()));
  }
}

fn field_line(label: &str, value: String) -> Line<'static> {
  Line::from(vec![
    Span::styled(
      format!("{label:<14}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::raw(value),
  ])
}

#[cfg(test)]
mod tests {
  use netbook_core::{Details, field::{Name, Tag}};

  use super::*;

  #[test]
  fn numbers_multi_valued_entries() {
    let details = Details {
      tags: UniqueList::try_from(vec![Tag::parse("a").unwrap(), Tag::parse("b").unwrap()])
        .unwrap(),
      ..Details::default()
    };
    let contact = Contact::from_parts(Name::parse("Alice").unwrap(), details);
    let lines = contact_lines(&contact);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].spans[0].content.trim_end(), "tag 2");
  }

  #[test]
  fn empty_contact_shows_a_hint() {
    let lines = contact_lines(&Contact::new(Name::parse("Bob").unwrap()));
    assert_eq!(lines.len(), 1);
  }
}
