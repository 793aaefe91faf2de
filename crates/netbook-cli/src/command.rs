//! Text commands: tokenising, parsing into [`Command`], and running them
//! against a [`VersionedStore`].
//!
//! Arguments use prefix syntax. A word starting with `/` opens a new argument
//! and every following word up to the next prefix is its value, so names and
//! specialisations may contain spaces:
//!
//! ```text
//! create /name Alice Pauline /phone 94351253 /course CS2103T /start 01-08-2023
//! edit 2 /tag classmate /index 1
//! delete 2 /priority
//! ```

use std::{fmt, str::FromStr};

use netbook_core::{
  Contact, ContactStorage, FieldEditor, FieldKind, FieldValue, Filter, Index,
  SortField, SortKey, SortOrder, VersionedStore,
  field::{Course, Email, Graduation, Link, Name, Phone, Priority, Specialisation, Tag},
};
use tracing::debug;

use crate::error::{Error, Result};

// ─── Usage ───────────────────────────────────────────────────────────────────

pub const CREATE_USAGE: &str = "create /name NAME [/phone PHONE].. [/email EMAIL].. \
  [/link LINK].. [/grad AYxxyy-S1] [/course CODE [/start DD-MM-YYYY] [/end DD-MM-YYYY]].. \
  [/spec SPECIALISATION].. [/tag TAG].. [/priority high|medium|low]";
pub const ADD_USAGE: &str = "add INDEX [/FIELD VALUE].. (any create prefix except /name)";
pub const EDIT_USAGE: &str = "edit INDEX /FIELD VALUE [/index I]";
pub const DELETE_USAGE: &str = "delete INDEX [/FIELD [/index I]]";
pub const FIND_USAGE: &str = "find KEYWORD [KEYWORD]..";
pub const FIND_EMAIL_USAGE: &str = "find-email QUERY";
pub const FIND_TAG_USAGE: &str = "find-tag TAG";
pub const SORT_USAGE: &str = "sort /by name|grad|priority|none [/order asc|desc]";

pub const HELP: &str = "commands: create, add, edit, delete, clear, find, find-email, \
  find-tag, list, sort, undo, redo, help, exit";

// ─── Tokenising ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
  Field(FieldKind),
  Start,
  End,
  Index,
  By,
  Order,
}

impl FromStr for Prefix {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Ok(match s {
      "start" => Self::Start,
      "end" => Self::End,
      "index" => Self::Index,
      "by" => Self::By,
      "order" => Self::Order,
      _ => FieldKind::from_str(s)
        .map(Self::Field)
        .map_err(|_| Error::UnknownPrefix(s.to_owned()))?,
    })
  }
}

impl fmt::Display for Prefix {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Field(kind) => fmt::Display::fmt(kind, f),
      Self::Start => f.write_str("start"),
      Self::End => f.write_str("end"),
      Self::Index => f.write_str("index"),
      Self::By => f.write_str("by"),
      Self::Order => f.write_str("order"),
    }
  }
}

/// Words before the first prefix, then each prefix with its value in input
/// order.
#[derive(Debug, Default)]
struct ArgList {
  preamble: String,
  args:     Vec<(Prefix, String)>,
}

impl ArgList {
  fn tokenize(input: &str) -> Result<Self> {
    let mut preamble = Vec::new();
    let mut args = Vec::new();
    let mut current: Option<(Prefix, Vec<&str>)> = None;

    for word in input.split_whitespace() {
      if let Some(name) = word.strip_prefix('/') {
        let prefix = name.parse()?;
        if let Some((p, words)) = current.replace((prefix, Vec::new())) {
          args.push((p, words.join(" ")));
        }
      } else {
        match &mut current {
          Some((_, words)) => words.push(word),
          None => preamble.push(word),
        }
      }
    }
    if let Some((p, words)) = current {
      args.push((p, words.join(" ")));
    }

    Ok(Self { preamble: preamble.join(" "), args })
  }

  /// Remove `prefix` from the list, returning its value. Giving it twice is
  /// an error.
  fn take(&mut self, prefix: Prefix) -> Result<Option<String>> {
    let mut found = None;
    let mut rest = Vec::with_capacity(self.args.len());
    for (p, value) in std::mem::take(&mut self.args) {
      if p != prefix {
        rest.push((p, value));
      } else if found.replace(value).is_some() {
        return Err(Error::RepeatedPrefix(prefix.to_string()));
      }
    }
    self.args = rest;
    Ok(found)
  }

  /// The preamble as a contact index.
  fn index(&self, usage: &'static str) -> Result<Index> {
    if self.preamble.is_empty() {
      return Err(Error::Usage(usage));
    }
    parse_index(&self.preamble)
  }

  fn take_index(&mut self) -> Result<Option<Index>> {
    self.take(Prefix::Index)?.map(|s| parse_index(&s)).transpose()
  }
}

fn parse_index(raw: &str) -> Result<Index> {
  raw
    .trim()
    .parse::<usize>()
    .ok()
    .and_then(Index::from_one_based)
    .ok_or_else(|| Error::BadIndex(raw.to_owned()))
}

fn parse_value(kind: FieldKind, raw: &str) -> Result<FieldValue> {
  Ok(match kind {
    FieldKind::Phone => FieldValue::Phone(Phone::parse(raw)?),
    FieldKind::Email => FieldValue::Email(Email::parse(raw)?),
    FieldKind::Link => FieldValue::Link(Link::parse(raw)?),
    FieldKind::Graduation => FieldValue::Graduation(Graduation::parse(raw)?),
    FieldKind::Course => FieldValue::Course(Course::parse(raw)?),
    FieldKind::Specialisation => FieldValue::Specialisation(Specialisation::parse(raw)?),
    FieldKind::Tag => FieldValue::Tag(Tag::parse(raw)?),
    FieldKind::Priority => FieldValue::Priority(Priority::parse(raw)?),
    FieldKind::Name => return Err(Error::UnexpectedPrefix(kind.to_string())),
  })
}

/// Parse field arguments in order. `/start` and `/end` attach to the
/// `/course` directly before them.
fn field_values(args: Vec<(Prefix, String)>) -> Result<Vec<FieldValue>> {
  let mut values = Vec::with_capacity(args.len());
  let mut iter = args.into_iter().peekable();
  while let Some((prefix, raw)) = iter.next() {
    let kind = match prefix {
      Prefix::Field(kind) => kind,
      Prefix::Start => return Err(Error::DanglingCourseDate("start")),
      Prefix::End => return Err(Error::DanglingCourseDate("end")),
      other => return Err(Error::UnexpectedPrefix(other.to_string())),
    };
    let value = if kind == FieldKind::Course {
      let start = iter.next_if(|(p, _)| *p == Prefix::Start).map(|(_, v)| v);
      let end = iter.next_if(|(p, _)| *p == Prefix::End).map(|(_, v)| v);
      FieldValue::Course(Course::with_dates(&raw, start.as_deref(), end.as_deref())?)
    } else {
      parse_value(kind, &raw)?
    };
    values.push(value);
  }
  Ok(values)
}

// ─── Command ─────────────────────────────────────────────────────────────────

/// The single change an `edit` command makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
  Rename(Name),
  Set { value: FieldValue, at: Option<Index> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Create(Contact),
  Add { index: Index, values: Vec<FieldValue> },
  Edit { index: Index, change: Change },
  Delete(Index),
  DeleteField { index: Index, field: FieldKind, at: Option<Index> },
  Clear,
  Find(Vec<String>),
  FindEmail(String),
  FindTag(Tag),
  List,
  Sort(SortKey),
  Undo,
  Redo,
  Help,
  Exit,
}

/// What a successful command reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
  pub message: String,
  pub exit:    bool,
}

impl Command {
  pub fn parse(input: &str) -> Result<Self> {
    let input = input.trim();
    let (word, rest) = input
      .split_once(char::is_whitespace)
      .unwrap_or((input, ""));

    match word {
      "create" => Self::parse_create(rest),
      "add" => Self::parse_add(rest),
      "edit" => Self::parse_edit(rest),
      "delete" => Self::parse_delete(rest),
      "find" => {
        let keywords: Vec<String> = rest.split_whitespace().map(str::to_owned).collect();
        if keywords.is_empty() {
          return Err(Error::Usage(FIND_USAGE));
        }
        Ok(Self::Find(keywords))
      }
      "find-email" => match rest.trim() {
        "" => Err(Error::Usage(FIND_EMAIL_USAGE)),
        query => Ok(Self::FindEmail(query.to_owned())),
      },
      "find-tag" => match rest.trim() {
        "" => Err(Error::Usage(FIND_TAG_USAGE)),
        tag => Ok(Self::FindTag(Tag::parse(tag)?)),
      },
      "clear" => Ok(Self::Clear),
      "list" => Ok(Self::List),
      "sort" => Self::parse_sort(rest),
      "undo" => Ok(Self::Undo),
      "redo" => Ok(Self::Redo),
      "help" => Ok(Self::Help),
      "exit" => Ok(Self::Exit),
      other => Err(Error::UnknownCommand(other.to_owned())),
    }
  }

  fn parse_create(rest: &str) -> Result<Self> {
    let mut args = ArgList::tokenize(rest)?;
    if !args.preamble.is_empty() {
      return Err(Error::Usage(CREATE_USAGE));
    }
    let name = args
      .take(Prefix::Field(FieldKind::Name))?
      .ok_or(Error::Usage(CREATE_USAGE))?;
    let base = Contact::new(Name::parse(&name)?);

    let mut editor = FieldEditor::new(&base);
    for value in field_values(args.args)? {
      editor.add(value)?;
    }
    Ok(Self::Create(editor.to_contact()))
  }

  fn parse_add(rest: &str) -> Result<Self> {
    let args = ArgList::tokenize(rest)?;
    let index = args.index(ADD_USAGE)?;
    let values = field_values(args.args)?;
    if values.is_empty() {
      return Err(Error::Usage(ADD_USAGE));
    }
    Ok(Self::Add { index, values })
  }

  fn parse_edit(rest: &str) -> Result<Self> {
    let mut args = ArgList::tokenize(rest)?;
    let index = args.index(EDIT_USAGE)?;
    let at = args.take_index()?;

    if let [(Prefix::Field(FieldKind::Name), raw)] = args.args.as_slice() {
      if at.is_some() {
        return Err(netbook_core::Error::UnexpectedIndex(FieldKind::Name).into());
      }
      return Ok(Self::Edit { index, change: Change::Rename(Name::parse(raw)?) });
    }

    let mut values = field_values(args.args)?;
    match values.pop() {
      Some(value) if values.is_empty() => {
        Ok(Self::Edit { index, change: Change::Set { value, at } })
      }
      _ => Err(Error::Usage(EDIT_USAGE)),
    }
  }

  fn parse_delete(rest: &str) -> Result<Self> {
    let mut args = ArgList::tokenize(rest)?;
    let index = args.index(DELETE_USAGE)?;
    let at = args.take_index()?;

    match args.args.as_slice() {
      [] if at.is_none() => Ok(Self::Delete(index)),
      [(Prefix::Field(field), value)] if value.is_empty() => {
        Ok(Self::DeleteField { index, field: *field, at })
      }
      _ => Err(Error::Usage(DELETE_USAGE)),
    }
  }

  fn parse_sort(rest: &str) -> Result<Self> {
    let mut args = ArgList::tokenize(rest)?;
    let by = args.take(Prefix::By)?.ok_or(Error::Usage(SORT_USAGE))?;
    let order = args.take(Prefix::Order)?;
    if !args.preamble.is_empty() || !args.args.is_empty() {
      return Err(Error::Usage(SORT_USAGE));
    }

    let field = SortField::from_str(by.trim()).map_err(|_| Error::Usage(SORT_USAGE))?;
    let order = order
      .map(|o| SortOrder::from_str(o.trim()))
      .transpose()
      .map_err(|_| Error::Usage(SORT_USAGE))?
      .unwrap_or_default();
    Ok(Self::Sort(SortKey::new(field, order)))
  }

  /// Commands that change the collection and are followed by a save.
  pub fn is_mutating(&self) -> bool {
    matches!(
      self,
      Self::Create(_)
        | Self::Add { .. }
        | Self::Edit { .. }
        | Self::Delete(_)
        | Self::DeleteField { .. }
        | Self::Clear
        | Self::Undo
        | Self::Redo
    )
  }

  // ── Execution ────────────────────────────────────────────────────────────

  /// Run the command. Mutations are saved through `storage` once the store
  /// has accepted them; a failed save leaves the in-memory change in place.
  pub fn execute<S: ContactStorage>(
    self,
    store: &mut VersionedStore,
    storage: &S,
  ) -> Result<Outcome> {
    let mutating = self.is_mutating();
    let message = match self {
      Self::Create(contact) => {
        let message = format!("New contact added: {contact}");
        store.add_contact(contact)?;
        message
      }
      Self::Add { index, values } => {
        let target = store.contact_at(index)?;
        let mut editor = FieldEditor::new(&target);
        for value in values {
          editor.add(value)?;
        }
        let edited = editor.finish()?;
        let message = format!("Added information to contact: {edited}");
        store.replace_contact(&target, edited)?;
        message
      }
      Self::Edit { index, change } => {
        let target = store.contact_at(index)?;
        let mut editor = FieldEditor::new(&target);
        match change {
          Change::Rename(name) => {
            editor.rename(name);
          }
          Change::Set { value, at } => {
            editor.set(value, at)?;
          }
        }
        let edited = editor.finish()?;
        let message = format!("Edited contact: {edited}");
        store.replace_contact(&target, edited)?;
        message
      }
      Self::Delete(index) => {
        let target = store.contact_at(index)?;
        let removed = store.delete_contact(&target)?;
        format!("Deleted contact: {removed}")
      }
      Self::DeleteField { index, field, at } => {
        let target = store.contact_at(index)?;
        let mut editor = FieldEditor::new(&target);
        editor.delete(field, at)?;
        let edited = editor.finish()?;
        let message = format!("Deleted {field} from contact: {edited}");
        store.replace_contact(&target, edited)?;
        message
      }
      Self::Clear => {
        store.clear();
        "Contact book has been cleared".to_owned()
      }
      Self::Find(keywords) => {
        store.set_filter(Filter::NameKeywords(keywords));
        listed(store)
      }
      Self::FindEmail(query) => {
        store.set_filter(Filter::EmailContains(query));
        listed(store)
      }
      Self::FindTag(tag) => {
        store.set_filter(Filter::HasTag(tag));
        listed(store)
      }
      Self::List => {
        store.set_filter(Filter::All);
        "Listed all contacts".to_owned()
      }
      Self::Sort(key) => {
        store.set_sort(key);
        format!("Sorted contacts by {} ({})", key.field, key.order)
      }
      Self::Undo => {
        store.undo()?;
        "Undo success!".to_owned()
      }
      Self::Redo => {
        store.redo()?;
        "Redo success!".to_owned()
      }
      Self::Help => HELP.to_owned(),
      Self::Exit => {
        return Ok(Outcome { message: "Goodbye!".to_owned(), exit: true });
      }
    };

    if mutating {
      storage
        .save(store.current())
        .map_err(|e| Error::Storage(Box::new(e)))?;
      debug!(contacts = store.current().len(), "saved after command");
    }
    Ok(Outcome { message, exit: false })
  }
}

fn listed(store: &VersionedStore) -> String {
  format!("{} contacts listed", store.visible().len())
}
