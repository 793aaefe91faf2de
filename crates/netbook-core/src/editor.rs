//! [`FieldEditor`]: stages changes against one contact and materialises the
//! edited copy.
//!
//! Three kinds of change are supported:
//!
//! - **add** appends a value to a multi-valued field, or fills an empty
//!   single-valued field. Filling a single-valued field that already holds a
//!   value is a [`Error::ConflictingSingleValue`]; the caller should replace.
//! - **set** replaces the value at a 1-based index of a multi-valued field, or
//!   overwrites a single-valued field.
//! - **delete** drops the value at a 1-based index, or clears a single-valued
//!   field.
//!
//! Every call validates before it touches the draft, so a failed call leaves
//! the staged state exactly as it was. The source contact is never modified.

use crate::{
  Contact, Error, FieldKind, FieldValue, Index, Result, UniqueList,
  contact::Details,
  field::Name,
};

#[derive(Debug)]
pub struct FieldEditor<'a> {
  source: &'a Contact,
  name:   Name,
  draft:  Details,
  staged: usize,
}

impl<'a> FieldEditor<'a> {
  pub fn new(source: &'a Contact) -> Self {
    Self {
      source,
      name: source.name().clone(),
      draft: source.details().clone(),
      staged: 0,
    }
  }

  /// Number of successfully staged changes.
  pub fn staged(&self) -> usize { self.staged }

  /// Change the contact's name. Whether the new name clashes with another
  /// contact is only known to the collection, at replace time.
  pub fn rename(&mut self, name: Name) -> &mut Self {
    self.name = name;
    self.staged += 1;
    self
  }

  pub fn add(&mut self, value: FieldValue) -> Result<&mut Self> {
    let kind = value.kind();
    let d = &mut self.draft;
    match value {
      FieldValue::Phone(v) => push(&mut d.phones, kind, v)?,
      FieldValue::Email(v) => push(&mut d.emails, kind, v)?,
      FieldValue::Link(v) => push(&mut d.links, kind, v)?,
      FieldValue::Course(v) => push(&mut d.courses, kind, v)?,
      FieldValue::Specialisation(v) => push(&mut d.specialisations, kind, v)?,
      FieldValue::Tag(v) => push(&mut d.tags, kind, v)?,
      FieldValue::Graduation(v) => fill(&mut d.graduation, kind, v)?,
      FieldValue::Priority(v) => fill(&mut d.priority, kind, v)?,
    }
    self.staged += 1;
    Ok(self)
  }

  /// Replace-style edit. Multi-valued fields need `index`; single-valued
  /// fields must not have one.
  pub fn set(&mut self, value: FieldValue, index: Option<Index>) -> Result<&mut Self> {
    let kind = value.kind();
    let d = &mut self.draft;
    match value {
      FieldValue::Phone(v) => replace_at(&mut d.phones, kind, v, index)?,
      FieldValue::Email(v) => replace_at(&mut d.emails, kind, v, index)?,
      FieldValue::Link(v) => replace_at(&mut d.links, kind, v, index)?,
      FieldValue::Course(v) => replace_at(&mut d.courses, kind, v, index)?,
      FieldValue::Specialisation(v) => {
        replace_at(&mut d.specialisations, kind, v, index)?
      }
      FieldValue::Tag(v) => replace_at(&mut d.tags, kind, v, index)?,
      FieldValue::Graduation(v) => overwrite(&mut d.graduation, kind, v, index)?,
      FieldValue::Priority(v) => overwrite(&mut d.priority, kind, v, index)?,
    }
    self.staged += 1;
    Ok(self)
  }

  /// Remove one value. Multi-valued fields need `index`; single-valued fields
  /// must not have one and must currently hold a value.
  pub fn delete(&mut self, kind: FieldKind, index: Option<Index>) -> Result<&mut Self> {
    let d = &mut self.draft;
    match kind {
      FieldKind::Name => {
        return Err(Error::InvalidField {
          field:  FieldKind::Name,
          value:  self.name.to_string(),
          reason: "a contact's name cannot be deleted",
        });
      }
      FieldKind::Phone => remove_at(&mut d.phones, kind, index)?,
      FieldKind::Email => remove_at(&mut d.emails, kind, index)?,
      FieldKind::Link => remove_at(&mut d.links, kind, index)?,
      FieldKind::Course => remove_at(&mut d.courses, kind, index)?,
      FieldKind::Specialisation => remove_at(&mut d.specialisations, kind, index)?,
      FieldKind::Tag => remove_at(&mut d.tags, kind, index)?,
      FieldKind::Graduation => clear(&mut d.graduation, kind, index)?,
      FieldKind::Priority => clear(&mut d.priority, kind, index)?,
    }
    self.staged += 1;
    Ok(self)
  }

  /// The contact as it would look with every staged change applied.
  pub fn to_contact(&self) -> Contact {
    Contact::from_parts(self.name.clone(), self.draft.clone())
  }

  /// Materialise the edited contact. Fails with [`Error::EmptyEdit`] if
  /// nothing was staged.
  pub fn finish(self) -> Result<Contact> {
    if self.staged == 0 {
      return Err(Error::EmptyEdit);
    }
    tracing::debug!(contact = %self.source.name(), staged = self.staged, "edit finished");
    Ok(Contact::from_parts(self.name, self.draft))
  }
}

// ─── Per-field helpers ───────────────────────────────────────────────────────

fn push<T: PartialEq>(list: &mut UniqueList<T>, kind: FieldKind, value: T) -> Result<()> {
  list.add(value).map_err(|e| e.for_field(kind))
}

fn replace_at<T: PartialEq>(
  list: &mut UniqueList<T>,
  kind: FieldKind,
  value: T,
  index: Option<Index>,
) -> Result<()> {
  let index = index.ok_or(Error::MissingIndex(kind))?;
  list
    .set(index.zero_based(), value)
    .map_err(|e| e.for_field(kind))
}

fn remove_at<T: PartialEq + Clone>(
  list: &mut UniqueList<T>,
  kind: FieldKind,
  index: Option<Index>,
) -> Result<()> {
  let index = index.ok_or(Error::MissingIndex(kind))?;
  *list = list.without(index.zero_based()).map_err(|e| e.for_field(kind))?;
  Ok(())
}

fn fill<T>(slot: &mut Option<T>, kind: FieldKind, value: T) -> Result<()> {
  if slot.is_some() {
    return Err(Error::ConflictingSingleValue(kind));
  }
  *slot = Some(value);
  Ok(())
}

fn overwrite<T>(
  slot: &mut Option<T>,
  kind: FieldKind,
  value: T,
  index: Option<Index>,
) -> Result<()> {
  if index.is_some() {
    return Err(Error::UnexpectedIndex(kind));
  }
  *slot = Some(value);
  Ok(())
}

fn clear<T>(slot: &mut Option<T>, kind: FieldKind, index: Option<Index>) -> Result<()> {
  if index.is_some() {
    return Err(Error::UnexpectedIndex(kind));
  }
  if slot.take().is_none() {
    return Err(Error::InvalidIndex { field: kind, index: 1 });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::field::{Course, Email, Phone, Priority, Tag};

  fn idx(n: usize) -> Option<Index> { Index::from_one_based(n) }

  fn phone(s: &str) -> FieldValue { FieldValue::Phone(Phone::parse(s).unwrap()) }

  fn alice() -> Contact {
    let details = Details {
      phones: UniqueList::try_from(vec![Phone::parse("123").unwrap()]).unwrap(),
      priority: Some(Priority::High),
      ..Details::default()
    };
    Contact::from_parts(Name::parse("Alice").unwrap(), details)
  }

  #[test]
  fn set_phone_at_valid_index() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    ed.set(phone("456"), idx(1)).unwrap();
    let edited = ed.finish().unwrap();

    let phones: Vec<&str> = edited.phones().iter().map(Phone::as_str).collect();
    assert_eq!(phones, ["456"]);
    assert_eq!(source.phones().get(0).unwrap().as_str(), "123");
  }

  #[test]
  fn set_phone_past_end_is_invalid_index() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    let err = ed.set(phone("456"), idx(2)).unwrap_err();
    assert_eq!(err, Error::InvalidIndex { field: FieldKind::Phone, index: 2 });
    assert_eq!(ed.staged(), 0);
    assert_eq!(ed.to_contact(), source);
  }

  #[test]
  fn set_onto_another_entry_is_duplicate() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    ed.add(phone("456")).unwrap();
    let err = ed.set(phone("123"), idx(2)).unwrap_err();
    assert_eq!(err, Error::DuplicateValue(FieldKind::Phone));
  }

  #[test]
  fn set_list_field_without_index_fails() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    assert_eq!(
      ed.set(phone("456"), None).unwrap_err(),
      Error::MissingIndex(FieldKind::Phone)
    );
  }

  #[test]
  fn add_priority_when_present_conflicts() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    let err = ed.add(FieldValue::Priority(Priority::Low)).unwrap_err();
    assert_eq!(err, Error::ConflictingSingleValue(FieldKind::Priority));
  }

  #[test]
  fn replace_priority_succeeds() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    ed.set(FieldValue::Priority(Priority::Low), None).unwrap();
    assert_eq!(ed.finish().unwrap().priority(), Some(Priority::Low));
  }

  #[test]
  fn replace_priority_with_index_fails() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    assert_eq!(
      ed.set(FieldValue::Priority(Priority::Low), idx(1)).unwrap_err(),
      Error::UnexpectedIndex(FieldKind::Priority)
    );
  }

  #[test]
  fn add_appends_to_lists_and_fills_empty_slots() {
    let source = Contact::new(Name::parse("Bob").unwrap());
    let mut ed = FieldEditor::new(&source);
    ed.add(FieldValue::Email(Email::parse("bob@example.com").unwrap()))
      .unwrap()
      .add(FieldValue::Tag(Tag::parse("friend").unwrap()))
      .unwrap()
      .add(FieldValue::Priority(Priority::Medium))
      .unwrap();
    assert_eq!(ed.staged(), 3);

    let edited = ed.finish().unwrap();
    assert_eq!(edited.emails().len(), 1);
    assert_eq!(edited.tags().len(), 1);
    assert_eq!(edited.priority(), Some(Priority::Medium));
  }

  #[test]
  fn add_duplicate_course_ignores_dates() {
    let source = Contact::new(Name::parse("Bob").unwrap());
    let mut ed = FieldEditor::new(&source);
    ed.add(FieldValue::Course(Course::parse("CS2103T").unwrap())).unwrap();
    let dated = Course::with_dates("CS2103T", Some("01-08-2023"), None).unwrap();
    assert_eq!(
      ed.add(FieldValue::Course(dated)).unwrap_err(),
      Error::DuplicateValue(FieldKind::Course)
    );
  }

  #[test]
  fn nothing_staged_is_empty_edit() {
    let source = alice();
    assert_eq!(FieldEditor::new(&source).finish().unwrap_err(), Error::EmptyEdit);
  }

  #[test]
  fn failed_calls_do_not_count_as_staged() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    let _ = ed.add(phone("123"));
    assert_eq!(ed.finish().unwrap_err(), Error::EmptyEdit);
  }

  #[test]
  fn delete_list_value_by_index() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    ed.add(phone("456")).unwrap().delete(FieldKind::Phone, idx(1)).unwrap();
    let phones: Vec<String> = ed.to_contact().phones().iter().map(ToString::to_string).collect();
    assert_eq!(phones, ["456"]);
  }

  #[test]
  fn delete_out_of_range_fails() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    assert_eq!(
      ed.delete(FieldKind::Email, idx(1)).unwrap_err(),
      Error::InvalidIndex { field: FieldKind::Email, index: 1 }
    );
  }

  #[test]
  fn delete_single_value_clears_it_once() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    ed.delete(FieldKind::Priority, None).unwrap();
    assert!(ed.delete(FieldKind::Priority, None).is_err());
    assert_eq!(ed.finish().unwrap().priority(), None);
  }

  #[test]
  fn name_cannot_be_deleted() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    assert!(matches!(
      ed.delete(FieldKind::Name, None),
      Err(Error::InvalidField { field: FieldKind::Name, .. })
    ));
  }

  #[test]
  fn rename_counts_as_a_change() {
    let source = alice();
    let mut ed = FieldEditor::new(&source);
    ed.rename(Name::parse("Alicia").unwrap());
    let edited = ed.finish().unwrap();
    assert_eq!(edited.name().as_str(), "Alicia");
    assert_eq!(edited.phones(), source.phones());
  }
}
