//! Display indices.

use std::fmt;

/// A position in a displayed list. Users see 1-based numbers; storage is
/// 0-based. Constructing from either side keeps the conversion in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index(usize);

impl Index {
  /// Returns `None` for `0`, which is not a valid display index.
  pub fn from_one_based(n: usize) -> Option<Self> {
    n.checked_sub(1).map(Self)
  }

  pub fn zero_based(self) -> usize { self.0 }

  pub fn one_based(self) -> usize { self.0 + 1 }
}

impl fmt::Display for Index {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.one_based())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn one_based_conversion() {
    let idx = Index::from_one_based(3).unwrap();
    assert_eq!(idx.zero_based(), 2);
    assert_eq!(idx.one_based(), 3);
    assert_eq!(idx.to_string(), "3");
  }

  #[test]
  fn zero_is_not_a_display_index() {
    assert!(Index::from_one_based(0).is_none());
  }
}
