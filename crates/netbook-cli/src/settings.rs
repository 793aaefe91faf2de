//! Runtime settings: defaults, then the TOML file, then `NETBOOK_*`
//! environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use netbook_core::StoreConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Where the contact file lives.
  #[serde(default = "default_data_path")]
  pub data_path:     PathBuf,
  /// Where tracing output goes. The terminal belongs to the UI.
  #[serde(default = "default_log_path")]
  pub log_path:      PathBuf,
  /// Maximum number of snapshots kept for undo. Unbounded when absent.
  #[serde(default)]
  pub history_limit: Option<usize>,
}

fn default_data_path() -> PathBuf { PathBuf::from("data/netbook.json") }

fn default_log_path() -> PathBuf { PathBuf::from("netbook.log") }

impl Default for Settings {
  fn default() -> Self {
    Self {
      data_path:     default_data_path(),
      log_path:      default_log_path(),
      history_limit: None,
    }
  }
}

impl Settings {
  /// Read `file` (if it exists) layered under the environment.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("NETBOOK").try_parsing(true))
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn store_config(&self) -> StoreConfig {
    StoreConfig { history_limit: self.history_limit }
  }
}
