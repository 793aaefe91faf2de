//! Core types for the netbook contact store.
//!
//! This crate holds the in-memory model only: validated field values, the
//! unique-list container, contacts, the contact collection, the staged field
//! editor, and the versioned store with undo/redo. It performs no I/O; the
//! [`ContactStorage`] trait is implemented by backends such as
//! `netbook-store-json`, and the command layer lives in `netbook-cli`.

pub mod collection;
pub mod contact;
pub mod editor;
pub mod error;
pub mod field;
pub mod index;
pub mod storage;
pub mod unique_list;
pub mod versioned;
pub mod view;

pub use collection::ContactCollection;
pub use contact::{Contact, Details};
pub use editor::FieldEditor;
pub use error::{Error, ListError, Result};
pub use field::{FieldKind, FieldValue};
pub use index::Index;
pub use storage::ContactStorage;
pub use unique_list::UniqueList;
pub use versioned::{Snapshot, StoreConfig, VersionedStore};
pub use view::{Filter, SortField, SortKey, SortOrder};
