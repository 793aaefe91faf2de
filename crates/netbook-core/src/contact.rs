//! Contact: one immutable entry in the collection.
//!
//! A contact is never modified once built; edits go through
//! [`FieldEditor`](crate::FieldEditor) and produce a new contact. Getters
//! hand out shared borrows, so callers cannot reach the internal lists
//! mutably; cloning a list is the explicit way to get a private copy.

use std::fmt;

use crate::{
  UniqueList,
  field::{Course, Email, Graduation, Link, Name, Phone, Priority, Specialisation, Tag},
};

/// Every field of a contact except its name. Empty lists and `None` mean
/// "no value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Details {
  pub phones:          UniqueList<Phone>,
  pub emails:          UniqueList<Email>,
  pub links:           UniqueList<Link>,
  pub graduation:      Option<Graduation>,
  pub courses:         UniqueList<Course>,
  pub specialisations: UniqueList<Specialisation>,
  pub tags:            UniqueList<Tag>,
  pub priority:        Option<Priority>,
}

/// A contact: a mandatory [`Name`] plus optional [`Details`].
///
/// `PartialEq` is the strong equality (every field). The weak, name-only
/// relation used for duplicate detection is [`Contact::is_same`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
  name:    Name,
  details: Details,
}

impl Contact {
  /// A contact with a name and nothing else.
  pub fn new(name: Name) -> Self { Self::from_parts(name, Details::default()) }

  pub fn from_parts(name: Name, details: Details) -> Self {
    Self { name, details }
  }

  pub fn into_parts(self) -> (Name, Details) { (self.name, self.details) }

  /// True if both contacts carry the same name (exact, case-sensitive).
  pub fn is_same(&self, other: &Contact) -> bool { self.name == other.name }

  pub fn name(&self) -> &Name { &self.name }

  pub fn details(&self) -> &Details { &self.details }

  pub fn phones(&self) -> &UniqueList<Phone> { &self.details.phones }

  pub fn emails(&self) -> &UniqueList<Email> { &self.details.emails }

  pub fn links(&self) -> &UniqueList<Link> { &self.details.links }

  pub fn graduation(&self) -> Option<Graduation> { self.details.graduation }

  pub fn courses(&self) -> &UniqueList<Course> { &self.details.courses }

  pub fn specialisations(&self) -> &UniqueList<Specialisation> {
    &self.details.specialisations
  }

  pub fn tags(&self) -> &UniqueList<Tag> { &self.details.tags }

  pub fn priority(&self) -> Option<Priority> { self.details.priority }
}

impl fmt::Display for Contact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let d = &self.details;
    write!(
      f,
      "{}; Phones: {}; Emails: {}; Links: {}",
      self.name, d.phones, d.emails, d.links
    )?;
    if let Some(g) = d.graduation {
      write!(f, "; Graduation: {g}")?;
    }
    write!(
      f,
      "; Courses: {}; Specialisations: {}; Tags: {}",
      d.courses, d.specialisations, d.tags
    )?;
    if let Some(p) = d.priority {
      write!(f, "; Priority: {p}")?;
    }
    Ok(())
  }
}
