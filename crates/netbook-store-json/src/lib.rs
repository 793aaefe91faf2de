//! JSON file backend for the netbook contact store.
//!
//! Serialises the current [`ContactCollection`](netbook_core::ContactCollection)
//! to a single pretty-printed JSON file and rebuilds it on load, re-validating
//! every field and uniqueness rule on the way in.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonStore;
