//! The persistence boundary.
//!
//! Backends (e.g. `netbook-store-json`) implement [`ContactStorage`]; the
//! command layer depends on this trait, not on a concrete format. Only the
//! current collection crosses the boundary: undo history is never persisted.

use crate::ContactCollection;

pub trait ContactStorage {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the stored collection, or `None` if nothing has been saved yet.
  ///
  /// Implementations must rebuild the collection through its checked
  /// constructors so that every uniqueness invariant is re-validated, and fail
  /// if any is violated.
  fn load(&self) -> Result<Option<ContactCollection>, Self::Error>;

  /// Persist `collection`, replacing whatever was stored.
  fn save(&self, collection: &ContactCollection) -> Result<(), Self::Error>;
}
