//! [`VersionedStore`]: the current contact collection plus a linear history
//! of snapshots with undo/redo.
//!
//! The store's state is `(history, cursor)`; the current collection is always
//! `history[cursor]`. Committing truncates any redo-able snapshots past the
//! cursor before appending. Undo and redo only move the cursor: they replay
//! stored snapshots and never re-run commands.
//!
//! Snapshots are [`Arc`]s of immutable collections, and collections share
//! their contacts, so a commit copies one vector of pointers.
//!
//! Observers do not register callbacks here. They call
//! [`VersionedStore::subscribe`] and receive each new current snapshot over a
//! [`tokio::sync::watch`] channel.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::watch;

use crate::{
  Contact, ContactCollection, Error, Index, Result,
  view::{Filter, SortKey},
};

/// An immutable capture of the whole collection at one point in history.
pub type Snapshot = Arc<ContactCollection>;

/// Tunables for [`VersionedStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
  /// Maximum number of snapshots kept, including the current one. Oldest
  /// snapshots are dropped first. `None` keeps everything.
  #[serde(default)]
  pub history_limit: Option<usize>,
}

pub struct VersionedStore {
  history: Vec<Snapshot>,
  cursor:  usize,
  config:  StoreConfig,
  filter:  Filter,
  sort:    SortKey,
  notify:  watch::Sender<Snapshot>,
}

impl VersionedStore {
  /// Start a history containing only `initial`.
  pub fn new(initial: ContactCollection) -> Self {
    Self::with_config(initial, StoreConfig::default())
  }

  pub fn with_config(initial: ContactCollection, config: StoreConfig) -> Self {
    let initial = Arc::new(initial);
    let (notify, _) = watch::channel(Arc::clone(&initial));
    Self {
      history: vec![initial],
      cursor: 0,
      config,
      filter: Filter::All,
      sort: SortKey::default(),
      notify,
    }
  }

  // ── History ──────────────────────────────────────────────────────────────

  /// The active snapshot.
  pub fn current(&self) -> &Snapshot { &self.history[self.cursor] }

  pub fn cursor(&self) -> usize { self.cursor }

  pub fn history_len(&self) -> usize { self.history.len() }

  pub fn can_undo(&self) -> bool { self.cursor > 0 }

  pub fn can_redo(&self) -> bool { self.cursor + 1 < self.history.len() }

  /// Make `collection` the current state, discarding any redo-able states.
  pub fn commit(&mut self, collection: ContactCollection) {
    self.history.truncate(self.cursor + 1);
    self.history.push(Arc::new(collection));
    self.cursor = self.history.len() - 1;
    self.enforce_history_limit();

    tracing::debug!(
      cursor = self.cursor,
      history = self.history.len(),
      "committed snapshot"
    );
    self.after_move();
  }

  pub fn undo(&mut self) -> Result<()> {
    if !self.can_undo() {
      return Err(Error::NoPreviousState);
    }
    self.cursor -= 1;
    tracing::debug!(cursor = self.cursor, "undo");
    self.after_move();
    Ok(())
  }

  pub fn redo(&mut self) -> Result<()> {
    if !self.can_redo() {
      return Err(Error::NoNextState);
    }
    self.cursor += 1;
    tracing::debug!(cursor = self.cursor, "redo");
    self.after_move();
    Ok(())
  }

  fn enforce_history_limit(&mut self) {
    let Some(limit) = self.config.history_limit else {
      return;
    };
    let limit = limit.max(1);
    if self.history.len() > limit {
      let excess = self.history.len() - limit;
      self.history.drain(..excess);
      self.cursor -= excess;
      tracing::warn!(dropped = excess, limit, "history limit reached; oldest snapshots dropped");
    }
  }

  /// Every state change shows the full list again and tells subscribers.
  fn after_move(&mut self) {
    self.filter = Filter::All;
    self.notify.send_replace(Arc::clone(self.current()));
  }

  // ── Mutations ────────────────────────────────────────────────────────────

  /// Apply `f` to a copy of the current collection and commit the result.
  /// On error nothing is committed.
  fn mutate<T>(
    &mut self,
    f: impl FnOnce(&mut ContactCollection) -> Result<T>,
  ) -> Result<T> {
    let mut next = ContactCollection::clone(self.current());
    let out = f(&mut next)?;
    self.commit(next);
    Ok(out)
  }

  pub fn add_contact(&mut self, contact: Contact) -> Result<()> {
    self.mutate(|c| c.add(contact))
  }

  pub fn delete_contact(&mut self, contact: &Contact) -> Result<Arc<Contact>> {
    self.mutate(|c| c.remove(contact))
  }

  pub fn replace_contact(&mut self, old: &Contact, new: Contact) -> Result<()> {
    self.mutate(|c| c.replace(old, new))
  }

  /// Replace the whole collection with an empty one, as a single undoable
  /// step.
  pub fn clear(&mut self) { self.commit(ContactCollection::new()) }

  // ── View ─────────────────────────────────────────────────────────────────

  /// The current collection, filtered and sorted for display.
  pub fn visible(&self) -> Vec<Arc<Contact>> {
    self.current().view(&self.filter, self.sort)
  }

  /// Resolve a 1-based display index against [`Self::visible`].
  pub fn contact_at(&self, index: Index) -> Result<Arc<Contact>> {
    self
      .visible()
      .get(index.zero_based())
      .cloned()
      .ok_or(Error::InvalidContactIndex(index.one_based()))
  }

  pub fn filter(&self) -> &Filter { &self.filter }

  /// Changing the filter is not a history event.
  pub fn set_filter(&mut self, filter: Filter) { self.filter = filter; }

  pub fn sort(&self) -> SortKey { self.sort }

  /// Changing the sort is not a history event.
  pub fn set_sort(&mut self, sort: SortKey) { self.sort = sort; }

  /// Receive every new current snapshot. The receiver starts with the current
  /// one already marked as seen.
  pub fn subscribe(&self) -> watch::Receiver<Snapshot> { self.notify.subscribe() }
}
