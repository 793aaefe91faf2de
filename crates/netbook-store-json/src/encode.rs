//! Conversions between core types and their on-disk JSON shapes.
//!
//! The `Raw*` structs mirror the file format field for field. Decoding goes
//! through the core constructors, so a hand-edited file cannot smuggle in an
//! invalid value or a duplicate.

use netbook_core::{
  Contact, ContactCollection, Details, FieldKind, UniqueList,
  field::{
    COURSE_DATE_FORMAT, Course, Email, Graduation, Link, Name, Phone, Priority,
    Specialisation, Tag,
  },
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The whole file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct RawBook {
  #[serde(default)]
  pub contacts: Vec<RawContact>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RawContact {
  pub name:            String,
  #[serde(default)]
  pub phones:          Vec<String>,
  #[serde(default)]
  pub emails:          Vec<String>,
  #[serde(default)]
  pub links:           Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub graduation:      Option<String>,
  #[serde(default)]
  pub courses:         Vec<RawCourse>,
  #[serde(default)]
  pub specialisations: Vec<String>,
  #[serde(default)]
  pub tags:            Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub priority:        Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RawCourse {
  pub code:  String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end:   Option<String>,
}

// ─── Encode ──────────────────────────────────────────────────────────────────

fn strings<T: ToString>(list: &UniqueList<T>) -> Vec<String> {
  list.iter().map(ToString::to_string).collect()
}

impl RawCourse {
  fn from_course(course: &Course) -> Self {
    Self {
      code:  course.code().to_owned(),
      start: course.start().map(|d| d.format(COURSE_DATE_FORMAT).to_string()),
      end:   course.end().map(|d| d.format(COURSE_DATE_FORMAT).to_string()),
    }
  }

  fn into_course(self) -> netbook_core::Result<Course> {
    Course::with_dates(&self.code, self.start.as_deref(), self.end.as_deref())
  }
}

impl RawContact {
  pub fn from_contact(contact: &Contact) -> Self {
    Self {
      name:            contact.name().to_string(),
      phones:          strings(contact.phones()),
      emails:          strings(contact.emails()),
      links:           strings(contact.links()),
      graduation:      contact.graduation().map(|g| g.to_string()),
      courses:         contact.courses().iter().map(RawCourse::from_course).collect(),
      specialisations: strings(contact.specialisations()),
      tags:            strings(contact.tags()),
      priority:        contact.priority().map(|p| p.to_string()),
    }
  }

  // ─── Decode ────────────────────────────────────────────────────────────────

  pub fn into_contact(self) -> netbook_core::Result<Contact> {
    let name = Name::parse(&self.name)?;
    let courses = self
      .courses
      .into_iter()
      .map(RawCourse::into_course)
      .collect::<netbook_core::Result<Vec<_>>>()?;

    let details = Details {
      phones:          parse_list(&self.phones, FieldKind::Phone, Phone::parse)?,
      emails:          parse_list(&self.emails, FieldKind::Email, Email::parse)?,
      links:           parse_list(&self.links, FieldKind::Link, Link::parse)?,
      graduation:      self.graduation.as_deref().map(Graduation::parse).transpose()?,
      courses:         UniqueList::try_from(courses)
        .map_err(|e| e.for_field(FieldKind::Course))?,
      specialisations: parse_list(
        &self.specialisations,
        FieldKind::Specialisation,
        Specialisation::parse,
      )?,
      tags:            parse_list(&self.tags, FieldKind::Tag, Tag::parse)?,
      priority:        self.priority.as_deref().map(Priority::parse).transpose()?,
    };
    Ok(Contact::from_parts(name, details))
  }
}

fn parse_list<T: PartialEq>(
  raw: &[String],
  kind: FieldKind,
  parse: fn(&str) -> netbook_core::Result<T>,
) -> netbook_core::Result<UniqueList<T>> {
  let values = raw
    .iter()
    .map(|s| parse(s))
    .collect::<netbook_core::Result<Vec<_>>>()?;
  UniqueList::try_from(values).map_err(|e| e.for_field(kind))
}

impl RawBook {
  pub fn from_collection(collection: &ContactCollection) -> Self {
    Self {
      contacts: collection
        .iter()
        .map(|c| RawContact::from_contact(c))
        .collect(),
    }
  }

  /// Rebuild the collection in file order. The first invalid contact or
  /// repeated name aborts the load, reported with its 1-based position.
  pub fn into_collection(self) -> Result<ContactCollection> {
    let mut collection = ContactCollection::new();
    for (i, raw) in self.contacts.into_iter().enumerate() {
      let position = i + 1;
      raw
        .into_contact()
        .and_then(|contact| collection.add(contact))
        .map_err(|source| Error::InvalidContact { position, source })?;
    }
    Ok(collection)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn raw(name: &str) -> RawContact {
    RawContact {
      name:            name.into(),
      phones:          vec![],
      emails:          vec![],
      links:           vec![],
      graduation:      None,
      courses:         vec![],
      specialisations: vec![],
      tags:            vec![],
      priority:        None,
    }
  }

  #[test]
  fn decodes_every_field() {
    let mut r = raw("Alice Pauline");
    r.phones = vec!["94351253".into()];
    r.emails = vec!["alice@example.com".into()];
    r.links = vec!["github.com/alice".into()];
    r.graduation = Some("AY2324-S2".into());
    r.courses = vec![RawCourse {
      code:  "CS2103T".into(),
      start: Some("01-08-2023".into()),
      end:   None,
    }];
    r.specialisations = vec!["Software Engineering".into()];
    r.tags = vec!["friend".into()];
    r.priority = Some("HIGH".into());

    let c = r.into_contact().unwrap();
    assert_eq!(c.name().as_str(), "Alice Pauline");
    assert_eq!(c.phones().len(), 1);
    assert_eq!(c.graduation().unwrap().to_string(), "AY2324-S2");
    assert!(c.courses().get(0).unwrap().start().is_some());
    assert_eq!(c.priority(), Some(Priority::High));
  }

  #[test]
  fn duplicate_list_values_fail_loudly() {
    let mut r = raw("Alice");
    r.tags = vec!["friend".into(), "friend".into()];
    assert_eq!(
      r.into_contact().unwrap_err(),
      netbook_core::Error::DuplicateValue(FieldKind::Tag)
    );
  }

  #[test]
  fn invalid_field_fails() {
    let mut r = raw("Alice");
    r.emails = vec!["not-an-email".into()];
    assert!(matches!(
      r.into_contact(),
      Err(netbook_core::Error::InvalidField { field: FieldKind::Email, .. })
    ));
  }

  #[test]
  fn duplicate_names_report_position() {
    let book = RawBook { contacts: vec![raw("A"), raw("B"), raw("A")] };
    let err = book.into_collection().unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidContact { position: 3, source: netbook_core::Error::DuplicateContact(_) }
    ));
  }

  #[test]
  fn encode_skips_absent_optionals() {
    let c = raw("Alice").into_contact().unwrap();
    let json = serde_json::to_value(RawContact::from_contact(&c)).unwrap();
    assert!(json.get("priority").is_none());
    assert_eq!(json["phones"], serde_json::json!([]));
  }
}
