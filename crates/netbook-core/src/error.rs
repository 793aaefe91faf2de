//! Error types for `netbook-core`.
//!
//! Errors carry the kind of failure plus the minimum data needed to describe
//! it (field, 1-based index, name). Rendering them for the user is the
//! command layer's job.

use thiserror::Error;

use crate::field::{FieldKind, Name};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("invalid {field} {value:?}: {reason}")]
  InvalidField {
    field:  FieldKind,
    value:  String,
    reason: &'static str,
  },

  #[error("the contact already has this {0}")]
  DuplicateValue(FieldKind),

  #[error("a contact named {0} already exists")]
  DuplicateContact(Name),

  /// `index` is 1-based, as displayed.
  #[error("the {field} index {index} is invalid")]
  InvalidIndex { field: FieldKind, index: usize },

  #[error("the contact index {0} is invalid")]
  InvalidContactIndex(usize),

  #[error("{0} holds a single value which is already set; replace it instead")]
  ConflictingSingleValue(FieldKind),

  #[error("at least one field must be provided")]
  EmptyEdit,

  #[error("editing a {0} needs an index")]
  MissingIndex(FieldKind),

  #[error("{0} holds a single value and takes no index")]
  UnexpectedIndex(FieldKind),

  #[error("contact not found: {0}")]
  NotFound(Name),

  #[error("no previous state to undo to")]
  NoPreviousState,

  #[error("no next state to redo to")]
  NoNextState,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a [`UniqueList`](crate::UniqueList) operation. The list does not
/// know which contact field it backs; [`ListError::for_field`] attaches that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
  #[error("value already present")]
  Duplicate,

  /// `index` is 0-based.
  #[error("index {index} out of range for length {len}")]
  OutOfRange { index: usize, len: usize },
}

impl ListError {
  pub fn for_field(self, field: FieldKind) -> Error {
    match self {
      Self::Duplicate => Error::DuplicateValue(field),
      Self::OutOfRange { index, .. } => Error::InvalidIndex {
        field,
        index: index + 1,
      },
    }
  }
}
