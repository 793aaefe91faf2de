//! [`JsonStore`], the JSON file implementation of [`ContactStorage`].

use std::{
  fs,
  io::Write as _,
  path::{Path, PathBuf},
};

use netbook_core::{ContactCollection, ContactStorage};
use tracing::{debug, info};

use crate::{Error, Result, encode::RawBook};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact collection persisted as one pretty-printed JSON file.
///
/// The store holds only the path; every `load` and `save` touches the disk.
#[derive(Debug, Clone)]
pub struct JsonStore {
  path: PathBuf,
}

impl JsonStore {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  fn io(&self, source: std::io::Error) -> Error {
    Error::Io { path: self.path.clone(), source }
  }

  /// Read and validate the file. `Ok(None)` when it does not exist yet.
  pub fn load(&self) -> Result<Option<ContactCollection>> {
    let text = match fs::read_to_string(&self.path) {
      Ok(text) => text,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        debug!(path = %self.path.display(), "no data file yet");
        return Ok(None);
      }
      Err(e) => return Err(self.io(e)),
    };

    let raw: RawBook = serde_json::from_str(&text)?;
    let collection = raw.into_collection()?;
    info!(
      path = %self.path.display(),
      contacts = collection.len(),
      "loaded contacts"
    );
    Ok(Some(collection))
  }

  /// [`load`](Self::load), falling back to an empty collection.
  pub fn load_or_default(&self) -> Result<ContactCollection> {
    Ok(self.load()?.unwrap_or_default())
  }

  /// Write the collection. The JSON goes to a sibling temp file first and is
  /// renamed over the target, so a crash never leaves a half-written file.
  pub fn save(&self, collection: &ContactCollection) -> Result<()> {
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(|e| self.io(e))?;
    }

    let json = serde_json::to_string_pretty(&RawBook::from_collection(collection))?;
    let tmp = self.temp_path();
    if let Err(e) = write_and_replace(&tmp, &self.path, json.as_bytes()) {
      // The target is untouched; drop the partial temp file.
      let _ = fs::remove_file(&tmp);
      return Err(self.io(e));
    }

    info!(
      path = %self.path.display(),
      contacts = collection.len(),
      "saved contacts"
    );
    Ok(())
  }

  fn temp_path(&self) -> PathBuf {
    let mut name = self
      .path
      .file_name()
      .map(|n| n.to_os_string())
      .unwrap_or_default();
    name.push(".tmp");
    self.path.with_file_name(name)
  }
}

fn write_and_replace(tmp: &Path, target: &Path, json: &[u8]) -> std::io::Result<()> {
  let mut file = fs::File::create(tmp)?;
  file.write_all(json)?;
  file.write_all(b"\n")?;
  file.sync_all()?;
  drop(file);
  fs::rename(tmp, target)
}

impl ContactStorage for JsonStore {
  type Error = Error;

  fn load(&self) -> Result<Option<ContactCollection>> { JsonStore::load(self) }

  fn save(&self, collection: &ContactCollection) -> Result<()> {
    JsonStore::save(self, collection)
  }
}
