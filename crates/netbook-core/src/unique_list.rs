//! [`UniqueList`]: an insertion-ordered list that never holds two equal
//! values.
//!
//! Operations that would introduce a duplicate fail with
//! [`ListError::Duplicate`] and leave the list untouched; nothing is silently
//! deduplicated. There is no in-place removal: callers that drop a value build
//! a filtered copy with [`UniqueList::without`].

use std::fmt;

use crate::ListError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueList<T> {
  items: Vec<T>,
}

impl<T> Default for UniqueList<T> {
  fn default() -> Self { Self { items: Vec::new() } }
}

impl<T> UniqueList<T> {
  pub fn new() -> Self { Self::default() }

  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  pub fn get(&self, index: usize) -> Option<&T> { self.items.get(index) }

  pub fn iter(&self) -> std::slice::Iter<'_, T> { self.items.iter() }

  pub fn as_slice(&self) -> &[T] { &self.items }
}

impl<T: PartialEq> UniqueList<T> {
  pub fn contains(&self, item: &T) -> bool { self.items.contains(item) }

  /// True if `item` equals an element at any position other than `index`.
  pub fn contains_except(&self, item: &T, index: usize) -> bool {
    self
      .items
      .iter()
      .enumerate()
      .any(|(i, existing)| i != index && existing == item)
  }

  /// Append `item`, failing if an equal value is already present.
  pub fn add(&mut self, item: T) -> Result<(), ListError> {
    if self.contains(&item) {
      return Err(ListError::Duplicate);
    }
    self.items.push(item);
    Ok(())
  }

  /// Replace the element at 0-based `index`. The slot being replaced does not
  /// count as a duplicate, so re-setting a value to itself succeeds.
  pub fn set(&mut self, index: usize, item: T) -> Result<(), ListError> {
    let len = self.items.len();
    if index >= len {
      return Err(ListError::OutOfRange { index, len });
    }
    if self.contains_except(&item, index) {
      return Err(ListError::Duplicate);
    }
    self.items[index] = item;
    Ok(())
  }

  /// A copy of this list with the element at 0-based `index` left out.
  pub fn without(&self, index: usize) -> Result<Self, ListError>
  where
    T: Clone,
  {
    let len = self.items.len();
    if index >= len {
      return Err(ListError::OutOfRange { index, len });
    }
    let items = self
      .items
      .iter()
      .enumerate()
      .filter(|(i, _)| *i != index)
      .map(|(_, item)| item.clone())
      .collect();
    Ok(Self { items })
  }
}

impl<T: PartialEq> TryFrom<Vec<T>> for UniqueList<T> {
  type Error = ListError;

  /// Rebuild a list value by value, failing on the first duplicate.
  fn try_from(values: Vec<T>) -> Result<Self, ListError> {
    let mut list = Self::new();
    for value in values {
      list.add(value)?;
    }
    Ok(list)
  }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
  type Item = &'a T;
  type IntoIter = std::slice::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter { self.items.iter() }
}

impl<T: fmt::Display> fmt::Display for UniqueList<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in self.items.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      write!(f, "{item}")?;
    }
    f.write_str("]")
  }
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;

  fn list(values: &[&'static str]) -> UniqueList<&'static str> {
    UniqueList::try_from(values.to_vec()).unwrap()
  }

  #[test]
  fn add_preserves_insertion_order() {
    let l = list(&["b", "a", "c"]);
    assert_eq!(l.as_slice(), &["b", "a", "c"]);
  }

  #[test]
  fn add_duplicate_fails() {
    let mut l = list(&["a"]);
    assert_eq!(l.add("a"), Err(ListError::Duplicate));
    assert_eq!(l, list(&["a"]));
  }

  #[test]
  fn set_replaces_in_place() {
    let mut l = list(&["a", "b", "c"]);
    l.set(1, "x").unwrap();
    assert_eq!(l.as_slice(), &["a", "x", "c"]);
  }

  #[test]
  fn set_to_own_value_is_not_a_duplicate() {
    let mut l = list(&["a", "b"]);
    l.set(1, "b").unwrap();
    assert_eq!(l, list(&["a", "b"]));
  }

  #[test]
  fn set_duplicate_of_other_slot_fails() {
    let mut l = list(&["a", "b"]);
    assert_eq!(l.set(1, "a"), Err(ListError::Duplicate));
    assert_eq!(l, list(&["a", "b"]));
  }

  #[test]
  fn set_out_of_range_fails() {
    let mut l = list(&["a"]);
    assert_eq!(
      l.set(1, "z"),
      Err(ListError::OutOfRange { index: 1, len: 1 })
    );
  }

  #[test]
  fn contains_except_skips_one_slot() {
    let l = list(&["a", "b"]);
    assert!(!l.contains_except(&"a", 0));
    assert!(l.contains_except(&"a", 1));
    assert!(!l.contains_except(&"z", 0));
  }

  #[test]
  fn clone_is_independent() {
    let original = list(&["a"]);
    let mut copy = original.clone();
    copy.add("b").unwrap();
    assert_eq!(original.len(), 1);
    assert_eq!(copy.len(), 2);
  }

  #[test]
  fn without_builds_a_filtered_copy() {
    let l = list(&["a", "b", "c"]);
    assert_eq!(l.without(1).unwrap(), list(&["a", "c"]));
    assert_eq!(l.len(), 3);
    assert!(l.without(3).is_err());
  }

  #[test]
  fn equality_is_order_sensitive() {
    assert_ne!(list(&["a", "b"]), list(&["b", "a"]));
  }

  #[test]
  fn try_from_rejects_duplicates() {
    assert_eq!(
      UniqueList::try_from(vec![1, 2, 1]),
      Err(ListError::Duplicate)
    );
  }

  #[test]
  fn display_lists_values() {
    assert_eq!(list(&["a", "b"]).to_string(), "[a, b]");
    assert_eq!(UniqueList::<u8>::new().to_string(), "[]");
  }

  proptest! {
    #[test]
    fn adding_a_present_value_twice_changes_nothing(
      values in proptest::collection::hash_set(0u32..1000, 1..20),
      pick in any::<prop::sample::Index>(),
    ) {
      let values: Vec<u32> = values.into_iter().collect();
      let mut l = UniqueList::try_from(values.clone()).unwrap();
      let x = values[pick.index(values.len())];
      let before = l.clone();

      prop_assert_eq!(l.add(x), Err(ListError::Duplicate));
      prop_assert_eq!(l, before);
    }
  }
}
