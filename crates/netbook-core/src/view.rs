//! Read-only projection of a collection for the display layer: a filter plus
//! a sort key. Projection never reorders or mutates the underlying collection.

use std::{cmp::Ordering, fmt, sync::Arc};

use strum::{Display, EnumString};

use crate::{Contact, field::Tag};

// ─── Filter ──────────────────────────────────────────────────────────────────

type Predicate = Arc<dyn Fn(&Contact) -> bool + Send + Sync>;

/// Which contacts are visible.
#[derive(Clone, Default)]
pub enum Filter {
  #[default]
  All,
  /// Name contains any of the keywords as a whole word, ignoring case.
  NameKeywords(Vec<String>),
  /// Some email contains the query, ignoring case.
  EmailContains(String),
  HasTag(Tag),
  Custom(Predicate),
}

impl Filter {
  pub fn custom(f: impl Fn(&Contact) -> bool + Send + Sync + 'static) -> Self {
    Self::Custom(Arc::new(f))
  }

  pub fn matches(&self, contact: &Contact) -> bool {
    match self {
      Self::All => true,
      Self::NameKeywords(keywords) => {
        let words: Vec<String> = contact
          .name()
          .as_str()
          .split_whitespace()
          .map(str::to_lowercase)
          .collect();
        keywords
          .iter()
          .map(|k| k.to_lowercase())
          .any(|k| words.contains(&k))
      }
      Self::EmailContains(query) => {
        let query = query.to_lowercase();
        contact
          .emails()
          .iter()
          .any(|e| e.as_str().to_lowercase().contains(&query))
      }
      Self::HasTag(tag) => contact.tags().contains(tag),
      Self::Custom(f) => f(contact),
    }
  }

  pub fn is_all(&self) -> bool { matches!(self, Self::All) }
}

impl fmt::Debug for Filter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::All => f.write_str("All"),
      Self::NameKeywords(k) => f.debug_tuple("NameKeywords").field(k).finish(),
      Self::EmailContains(q) => f.debug_tuple("EmailContains").field(q).finish(),
      Self::HasTag(t) => f.debug_tuple("HasTag").field(t).finish(),
      Self::Custom(_) => f.write_str("Custom(..)"),
    }
  }
}

// ─── Sort ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SortField {
  /// Keep collection order.
  #[default]
  #[strum(to_string = "none")]
  None,
  #[strum(to_string = "name")]
  Name,
  #[strum(to_string = "graduation", serialize = "grad")]
  Graduation,
  #[strum(to_string = "priority")]
  Priority,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SortOrder {
  #[default]
  #[strum(to_string = "asc", serialize = "ascending")]
  Ascending,
  #[strum(to_string = "desc", serialize = "descending")]
  Descending,
}

impl SortOrder {
  fn apply(self, ord: Ordering) -> Ordering {
    match self {
      Self::Ascending => ord,
      Self::Descending => ord.reverse(),
    }
  }
}

/// How visible contacts are ordered. Contacts missing the sort field always
/// come last, whichever the order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortKey {
  pub field: SortField,
  pub order: SortOrder,
}

impl SortKey {
  pub fn new(field: SortField, order: SortOrder) -> Self { Self { field, order } }

  pub fn compare(&self, a: &Contact, b: &Contact) -> Ordering {
    match self.field {
      SortField::None => Ordering::Equal,
      SortField::Name => self.order.apply(
        a.name()
          .as_str()
          .to_lowercase()
          .cmp(&b.name().as_str().to_lowercase())
          .then_with(|| a.name().cmp(b.name())),
      ),
      SortField::Graduation => {
        present_first(a.graduation(), b.graduation(), self.order)
      }
      SortField::Priority => present_first(a.priority(), b.priority(), self.order),
    }
  }
}

fn present_first<T: Ord>(a: Option<T>, b: Option<T>, order: SortOrder) -> Ordering {
  match (a, b) {
    (Some(x), Some(y)) => order.apply(x.cmp(&y)),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  }
}

/// Filter then stable-sort `contacts`.
pub fn project<'a>(
  contacts: impl IntoIterator<Item = &'a Arc<Contact>>,
  filter: &Filter,
  sort: SortKey,
) -> Vec<Arc<Contact>> {
  let mut visible: Vec<Arc<Contact>> = contacts
    .into_iter()
    .filter(|c| filter.matches(c))
    .cloned()
    .collect();
  if sort.field != SortField::None {
    visible.sort_by(|a, b| sort.compare(a, b));
  }
  visible
}
