//! [`ContactCollection`]: the ordered set of contacts, unique by name.
//!
//! Contacts are held behind [`Arc`], so cloning a collection (which every
//! history snapshot does) copies pointers, not contacts.

use std::sync::Arc;

use crate::{
  Contact, Error, Result,
  view::{self, Filter, SortKey},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactCollection {
  contacts: Vec<Arc<Contact>>,
}

impl ContactCollection {
  pub fn new() -> Self { Self::default() }

  pub fn len(&self) -> usize { self.contacts.len() }

  pub fn is_empty(&self) -> bool { self.contacts.is_empty() }

  pub fn contacts(&self) -> &[Arc<Contact>] { &self.contacts }

  pub fn iter(&self) -> std::slice::Iter<'_, Arc<Contact>> { self.contacts.iter() }

  /// True if some stored contact has the same name as `contact`.
  pub fn contains(&self, contact: &Contact) -> bool {
    self.contacts.iter().any(|c| c.is_same(contact))
  }

  /// Append `contact`, failing if a contact with its name is already stored.
  pub fn add(&mut self, contact: impl Into<Arc<Contact>>) -> Result<()> {
    let contact = contact.into();
    if self.contains(&contact) {
      return Err(Error::DuplicateContact(contact.name().clone()));
    }
    self.contacts.push(contact);
    Ok(())
  }

  /// Remove the stored contact equal (every field) to `contact`.
  pub fn remove(&mut self, contact: &Contact) -> Result<Arc<Contact>> {
    let pos = self.position(contact)?;
    Ok(self.contacts.remove(pos))
  }

  /// Swap `old` for `new` in place. `old` must be stored (every field equal);
  /// `new` may keep `old`'s name but must not share a name with any other
  /// stored contact.
  pub fn replace(&mut self, old: &Contact, new: impl Into<Arc<Contact>>) -> Result<()> {
    let new = new.into();
    let pos = self.position(old)?;
    let clash = self
      .contacts
      .iter()
      .enumerate()
      .any(|(i, c)| i != pos && c.is_same(&new));
    if clash {
      return Err(Error::DuplicateContact(new.name().clone()));
    }
    self.contacts[pos] = new;
    Ok(())
  }

  /// Filtered and sorted view for display. The collection itself is not
  /// reordered.
  pub fn view(&self, filter: &Filter, sort: SortKey) -> Vec<Arc<Contact>> {
    view::project(&self.contacts, filter, sort)
  }

  fn position(&self, contact: &Contact) -> Result<usize> {
    self
      .contacts
      .iter()
      .position(|c| **c == *contact)
      .ok_or_else(|| Error::NotFound(contact.name().clone()))
  }
}

impl TryFrom<Vec<Contact>> for ContactCollection {
  type Error = Error;

  /// Rebuild a collection contact by contact, failing on the first repeated
  /// name.
  fn try_from(contacts: Vec<Contact>) -> Result<Self> {
    let mut collection = Self::new();
    for contact in contacts {
      collection.add(contact)?;
    }
    Ok(collection)
  }
}

impl<'a> IntoIterator for &'a ContactCollection {
  type Item = &'a Arc<Contact>;
  type IntoIter = std::slice::Iter<'a, Arc<Contact>>;

  fn into_iter(self) -> Self::IntoIter { self.contacts.iter() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    UniqueList,
    contact::Details,
    field::{Name, Priority, Tag},
  };

  fn named(name: &str) -> Contact { Contact::new(Name::parse(name).unwrap()) }

  fn tagged(name: &str, tag: &str) -> Contact {
    let details = Details {
      tags: UniqueList::try_from(vec![Tag::parse(tag).unwrap()]).unwrap(),
      ..Details::default()
    };
    Contact::from_parts(Name::parse(name).unwrap(), details)
  }

  fn collection(names: &[&str]) -> ContactCollection {
    ContactCollection::try_from(names.iter().map(|n| named(n)).collect::<Vec<_>>()).unwrap()
  }

  #[test]
  fn add_rejects_same_name() {
    let mut c = collection(&["Alice"]);
    let err = c.add(tagged("Alice", "friend")).unwrap_err();
    assert_eq!(err, Error::DuplicateContact(Name::parse("Alice").unwrap()));
    assert_eq!(c, collection(&["Alice"]));
  }

  #[test]
  fn contains_uses_name_only() {
    let c = collection(&["Alice"]);
    assert!(c.contains(&tagged("Alice", "friend")));
    assert!(!c.contains(&named("Bob")));
  }

  #[test]
  fn remove_requires_full_equality() {
    let mut c = collection(&["Alice", "Bob"]);
    assert!(matches!(c.remove(&tagged("Alice", "x")), Err(Error::NotFound(_))));
    c.remove(&named("Alice")).unwrap();
    assert_eq!(c, collection(&["Bob"]));
  }

  #[test]
  fn replace_keeps_position() {
    let mut c = collection(&["Alice", "Bob", "Carl"]);
    c.replace(&named("Bob"), tagged("Bob", "friend")).unwrap();
    assert_eq!(c.contacts()[1].tags().len(), 1);
    assert_eq!(c.len(), 3);
  }

  #[test]
  fn replace_may_keep_own_name_or_take_a_free_one() {
    let mut c = collection(&["Alice", "Bob"]);
    c.replace(&named("Bob"), named("Robert")).unwrap();
    assert_eq!(c, collection(&["Alice", "Robert"]));
  }

  #[test]
  fn replace_onto_another_name_fails_and_changes_nothing() {
    let mut c = collection(&["Alice", "Bob", "Carl"]);
    let before = c.clone();
    let err = c.replace(&named("Bob"), named("Carl")).unwrap_err();
    assert_eq!(err, Error::DuplicateContact(Name::parse("Carl").unwrap()));
    assert_eq!(c, before);
  }

  #[test]
  fn replace_missing_contact_fails() {
    let mut c = collection(&["Alice"]);
    let err = c.replace(&named("Zed"), named("Zed")).unwrap_err();
    assert_eq!(err, Error::NotFound(Name::parse("Zed").unwrap()));
  }

  #[test]
  fn try_from_rejects_duplicate_names() {
    let err = ContactCollection::try_from(vec![named("A"), named("A")]).unwrap_err();
    assert!(matches!(err, Error::DuplicateContact(_)));
  }

  #[test]
  fn view_does_not_reorder_collection() {
    let mut c = collection(&["Carl", "Alice"]);
    let details = Details { priority: Some(Priority::High), ..Details::default() };
    c.add(Contact::from_parts(Name::parse("Bob").unwrap(), details)).unwrap();

    let sorted = c.view(
      &Filter::All,
      SortKey::new(view::SortField::Name, view::SortOrder::Ascending),
    );
    let names: Vec<&str> = sorted.iter().map(|x| x.name().as_str()).collect();
    assert_eq!(names, ["Alice", "Bob", "Carl"]);
    assert_eq!(c.contacts()[0].name().as_str(), "Carl");

    let filtered = c.view(&Filter::custom(|x| x.priority().is_some()), SortKey::default());
    assert_eq!(filtered.len(), 1);
  }

  #[test]
  fn clones_share_contacts() {
    let a = collection(&["Alice"]);
    let b = a.clone();
    assert!(Arc::ptr_eq(&a.contacts()[0], &b.contacts()[0]));
  }
}
