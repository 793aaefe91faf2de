//! Validated field values, the building blocks of a [`Contact`](crate::Contact).
//!
//! Every value is constructed through `parse`, which trims its input and
//! rejects anything the field's rule does not accept. A value that exists is
//! therefore always valid; nothing downstream re-checks it.

use std::{fmt, str::FromStr, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;
use strum::{Display, EnumIter, EnumString};

use crate::{Error, Result};

// ─── Field kinds ─────────────────────────────────────────────────────────────

/// Names each contact field. Used for error reporting and for addressing a
/// field in edit and delete commands.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum FieldKind {
  #[strum(to_string = "name")]
  Name,
  #[strum(to_string = "phone")]
  Phone,
  #[strum(to_string = "email")]
  Email,
  #[strum(to_string = "link")]
  Link,
  #[strum(to_string = "graduation", serialize = "grad")]
  Graduation,
  #[strum(to_string = "course")]
  Course,
  #[strum(to_string = "specialisation", serialize = "spec")]
  Specialisation,
  #[strum(to_string = "tag")]
  Tag,
  #[strum(to_string = "priority")]
  Priority,
}

impl FieldKind {
  /// Fields stored as a [`UniqueList`](crate::UniqueList).
  pub fn is_multi_valued(self) -> bool {
    matches!(
      self,
      Self::Phone
        | Self::Email
        | Self::Link
        | Self::Course
        | Self::Specialisation
        | Self::Tag
    )
  }

  /// Optional fields that hold at most one value.
  pub fn is_single_valued(self) -> bool {
    matches!(self, Self::Graduation | Self::Priority)
  }
}

// ─── Text fields ─────────────────────────────────────────────────────────────

static NAME_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} '\-.,]*$").expect("static regex"));
static PHONE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\+?\d[\d \-]*\d$").expect("static regex"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[\w.+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
    .expect("static regex")
});
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(https?://)?[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)+(:\d+)?(/\S*)?$")
    .expect("static regex")
});
static TAG_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}]+$").expect("static regex"));

/// Defines a trimmed, validated string newtype.
macro_rules! text_field {
  (
    $(#[$meta:meta])*
    $ty:ident, $kind:expr, $reason:literal, $valid:expr
  ) => {
    $(#[$meta])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct $ty(String);

    impl $ty {
      /// Returns true if `raw` (already trimmed) is acceptable.
      pub fn is_valid(raw: &str) -> bool {
        let check: fn(&str) -> bool = $valid;
        check(raw)
      }

      pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if Self::is_valid(trimmed) {
          Ok(Self(trimmed.to_owned()))
        } else {
          Err(Error::InvalidField {
            field:  $kind,
            value:  raw.to_owned(),
            reason: $reason,
          })
        }
      }

      pub fn as_str(&self) -> &str { &self.0 }
    }

    impl fmt::Display for $ty {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl FromStr for $ty {
      type Err = Error;

      fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
    }
  };
}

text_field!(
  /// A contact's name; the identity used for duplicate detection. Matching is
  /// exact and case-sensitive.
  Name,
  FieldKind::Name,
  "names start with a letter or digit and may contain spaces and ' - . ,",
  |s| NAME_RE.is_match(s)
);

text_field!(
  /// A phone number: at least three digits, optional leading `+`, spaces and
  /// dashes allowed between digits.
  Phone,
  FieldKind::Phone,
  "phone numbers need at least 3 digits and may only contain digits, spaces, dashes and a leading +",
  |s| PHONE_RE.is_match(s) && s.chars().filter(char::is_ascii_digit).count() >= 3
);

text_field!(
  Email,
  FieldKind::Email,
  "emails take the form local-part@domain.tld",
  |s| EMAIL_RE.is_match(s)
);

text_field!(
  /// A web link, with or without an `http(s)://` scheme.
  Link,
  FieldKind::Link,
  "links take the form [http(s)://]host.tld[/path]",
  |s| LINK_RE.is_match(s)
);

text_field!(
  Specialisation,
  FieldKind::Specialisation,
  "specialisations cannot be blank",
  |s| !s.trim().is_empty()
);

text_field!(
  Tag,
  FieldKind::Tag,
  "tags are a single alphanumeric word",
  |s| TAG_RE.is_match(s)
);

// ─── Graduation ──────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Semester {
  S1,
  S2,
  ST1,
  ST2,
}

static GRADUATION_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)^AY(\d{2})(\d{2})-(S1|S2|ST1|ST2)$").expect("static regex")
});

/// The academic semester a contact graduates in, written `AY2324-S1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Graduation {
  /// Calendar year the academic year starts in, e.g. `2023` for `AY2324`.
  start_year: u16,
  semester:   Semester,
}

impl Graduation {
  pub fn parse(raw: &str) -> Result<Self> {
    let invalid = |reason| Error::InvalidField {
      field: FieldKind::Graduation,
      value: raw.to_owned(),
      reason,
    };
    let trimmed = raw.trim();
    let caps = GRADUATION_RE
      .captures(trimmed)
      .ok_or_else(|| invalid("graduations take the form AY2324-S1 (semesters S1, S2, ST1, ST2)"))?;

    // The regex guarantees two ASCII digits in each group.
    let first: u16 = caps[1].parse().map_err(|_| invalid("malformed year"))?;
    let second: u16 = caps[2].parse().map_err(|_| invalid("malformed year"))?;
    if (first + 1) % 100 != second {
      return Err(invalid("the second year must directly follow the first"));
    }
    let semester = Semester::from_str(&caps[3])
      .map_err(|_| invalid("unknown semester"))?;

    Ok(Self { start_year: 2000 + first, semester })
  }

  pub fn is_valid(raw: &str) -> bool { Self::parse(raw).is_ok() }

  pub fn start_year(&self) -> u16 { self.start_year }

  pub fn semester(&self) -> Semester { self.semester }
}

impl fmt::Display for Graduation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "AY{:02}{:02}-{}",
      self.start_year % 100,
      (self.start_year + 1) % 100,
      self.semester
    )
  }
}

// ─── Course ──────────────────────────────────────────────────────────────────

static COURSE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z]{2,3}\d{4}[A-Z]?$").expect("static regex"));

/// Date format used for course start and end dates.
pub const COURSE_DATE_FORMAT: &str = "%d-%m-%Y";

/// A course taken, e.g. `CS2103T`, optionally with the dates it was taken.
///
/// Equality and hashing consider the course code only: a contact cannot list
/// the same course twice with different dates.
#[derive(Debug, Clone)]
pub struct Course {
  code:  String,
  start: Option<NaiveDate>,
  end:   Option<NaiveDate>,
}

impl Course {
  pub fn is_valid_code(raw: &str) -> bool { COURSE_RE.is_match(raw) }

  /// Parse a bare course code.
  pub fn parse(raw: &str) -> Result<Self> { Self::with_dates(raw, None, None) }

  /// Parse a course code with optional `DD-MM-YYYY` start and end dates. An end
  /// date requires a start date and must fall after it.
  pub fn with_dates(
    code: &str,
    start: Option<&str>,
    end: Option<&str>,
  ) -> Result<Self> {
    let trimmed = code.trim();
    if !Self::is_valid_code(trimmed) {
      return Err(Error::InvalidField {
        field:  FieldKind::Course,
        value:  code.to_owned(),
        reason: "courses are a 2-3 letter faculty code, 4 digits and an optional variant letter, all uppercase",
      });
    }

    let start = start.map(parse_course_date).transpose()?;
    let end = end.map(parse_course_date).transpose()?;
    match (start, end) {
      (None, Some(_)) => Err(Error::InvalidField {
        field:  FieldKind::Course,
        value:  code.to_owned(),
        reason: "an end date needs a start date",
      }),
      (Some(s), Some(e)) if e <= s => Err(Error::InvalidField {
        field:  FieldKind::Course,
        value:  code.to_owned(),
        reason: "the end date must fall after the start date",
      }),
      _ => Ok(Self { code: trimmed.to_owned(), start, end }),
    }
  }

  pub fn code(&self) -> &str { &self.code }

  pub fn start(&self) -> Option<NaiveDate> { self.start }

  pub fn end(&self) -> Option<NaiveDate> { self.end }
}

fn parse_course_date(raw: &str) -> Result<NaiveDate> {
  let trimmed = raw.trim();
  NaiveDate::parse_from_str(trimmed, COURSE_DATE_FORMAT)
    .ok()
    // Reject forms chrono tolerates but we do not print, e.g. `1-8-2023`.
    .filter(|d| d.format(COURSE_DATE_FORMAT).to_string() == trimmed)
    .ok_or_else(|| Error::InvalidField {
      field:  FieldKind::Course,
      value:  raw.to_owned(),
      reason: "course dates take the form DD-MM-YYYY",
    })
}

impl PartialEq for Course {
  fn eq(&self, other: &Self) -> bool { self.code == other.code }
}

impl Eq for Course {}

impl std::hash::Hash for Course {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) { self.code.hash(state) }
}

impl fmt::Display for Course {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.code)?;
    if let Some(start) = self.start {
      write!(f, " (Started: {})", start.format(COURSE_DATE_FORMAT))?;
    }
    if let Some(end) = self.end {
      write!(f, " (Ended: {})", end.format(COURSE_DATE_FORMAT))?;
    }
    Ok(())
  }
}

// ─── Priority ────────────────────────────────────────────────────────────────

/// How important a contact is. Ordered `Low < Medium < High`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Priority {
  #[strum(to_string = "low", serialize = "l")]
  Low,
  #[strum(to_string = "medium", serialize = "m")]
  Medium,
  #[strum(to_string = "high", serialize = "h")]
  High,
}

impl Priority {
  pub fn parse(raw: &str) -> Result<Self> {
    Self::from_str(raw.trim()).map_err(|_| Error::InvalidField {
      field:  FieldKind::Priority,
      value:  raw.to_owned(),
      reason: "priority is one of high, medium or low",
    })
  }

  pub fn is_valid(raw: &str) -> bool { Self::parse(raw).is_ok() }
}

// ─── FieldValue ──────────────────────────────────────────────────────────────

/// One value for one editable field. `Name` is not here: it is mandatory and
/// changed through [`FieldEditor::rename`](crate::FieldEditor::rename).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
  Phone(Phone),
  Email(Email),
  Link(Link),
  Graduation(Graduation),
  Course(Course),
  Specialisation(Specialisation),
  Tag(Tag),
  Priority(Priority),
}

impl FieldValue {
  pub fn kind(&self) -> FieldKind {
    match self {
      Self::Phone(_) => FieldKind::Phone,
      Self::Email(_) => FieldKind::Email,
      Self::Link(_) => FieldKind::Link,
      Self::Graduation(_) => FieldKind::Graduation,
      Self::Course(_) => FieldKind::Course,
      Self::Specialisation(_) => FieldKind::Specialisation,
      Self::Tag(_) => FieldKind::Tag,
      Self::Priority(_) => FieldKind::Priority,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn field_kind_parses_aliases() {
    assert_eq!("grad".parse::<FieldKind>().unwrap(), FieldKind::Graduation);
    assert_eq!("Spec".parse::<FieldKind>().unwrap(), FieldKind::Specialisation);
    assert_eq!(FieldKind::Specialisation.to_string(), "specialisation");
    assert!("address".parse::<FieldKind>().is_err());
  }

  #[test]
  fn name_is_trimmed_and_case_sensitive() {
    let a = Name::parse("  Alice Pauline ").unwrap();
    assert_eq!(a.as_str(), "Alice Pauline");
    assert_ne!(a, Name::parse("alice pauline").unwrap());
    assert!(Name::parse("   ").is_err());
    assert!(Name::parse("*Alice").is_err());
  }

  #[test]
  fn phone_rules() {
    assert!(Phone::parse("+65 9123-4567").is_ok());
    assert!(Phone::parse("911").is_ok());
    assert!(Phone::parse("91").is_err());
    assert!(Phone::parse("phone").is_err());
  }

  #[test]
  fn email_and_link_rules() {
    assert!(Email::parse("alice@example.com").is_ok());
    assert!(Email::parse("alice@example").is_err());
    assert!(Link::parse("https://github.com/alice").is_ok());
    assert!(Link::parse("linkedin.com/in/alice").is_ok());
    assert!(Link::parse("not a link").is_err());
  }

  #[test]
  fn tag_is_one_word() {
    assert!(Tag::parse("friend").is_ok());
    assert!(Tag::parse("close friend").is_err());
  }

  #[test]
  fn graduation_round_trips_through_display() {
    let g = Graduation::parse("ay2324-s1").unwrap();
    assert_eq!(g.start_year(), 2023);
    assert_eq!(g.semester(), Semester::S1);
    assert_eq!(g.to_string(), "AY2324-S1");
    assert_eq!(Graduation::parse("AY9900-ST2").unwrap().to_string(), "AY9900-ST2");
  }

  #[test]
  fn graduation_years_must_be_consecutive() {
    let err = Graduation::parse("AY2325-S1").unwrap_err();
    assert!(matches!(err, Error::InvalidField { field: FieldKind::Graduation, .. }));
  }

  #[test]
  fn graduation_orders_by_year_then_semester() {
    let a = Graduation::parse("AY2223-S2").unwrap();
    let b = Graduation::parse("AY2324-S1").unwrap();
    let c = Graduation::parse("AY2324-S2").unwrap();
    assert!(a < b && b < c);
  }

  #[test]
  fn course_equality_ignores_dates() {
    let bare = Course::parse("CS2103T").unwrap();
    let dated = Course::with_dates("CS2103T", Some("01-08-2023"), Some("30-11-2023")).unwrap();
    assert_eq!(bare, dated);
    assert_eq!(dated.to_string(), "CS2103T (Started: 01-08-2023) (Ended: 30-11-2023)");
  }

  #[test]
  fn course_date_rules() {
    assert!(Course::parse("cs2103t").is_err());
    assert!(Course::with_dates("CS2103T", Some("1-8-2023"), None).is_err());
    assert!(Course::with_dates("CS2103T", None, Some("01-08-2023")).is_err());
    assert!(Course::with_dates("CS2103T", Some("30-11-2023"), Some("01-08-2023")).is_err());
    assert!(Course::with_dates("CS2103T", Some("01-08-2023"), None).is_ok());
  }

  #[test]
  fn priority_parsing_and_order() {
    assert_eq!(Priority::parse("HIGH").unwrap(), Priority::High);
    assert_eq!(Priority::parse(" m ").unwrap(), Priority::Medium);
    assert!(Priority::parse("urgent").is_err());
    assert!(Priority::Low < Priority::Medium && Priority::Medium < Priority::High);
    assert_eq!(Priority::High.to_string(), "high");
  }

  #[test]
  fn field_value_reports_its_kind() {
    let v = FieldValue::Tag(Tag::parse("friend").unwrap());
    assert_eq!(v.kind(), FieldKind::Tag);
    assert!(v.kind().is_multi_valued());
    assert!(FieldKind::Priority.is_single_valued());
  }
}
