//! Errors surfaced to the user by the command layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown command `{0}`; type `help` for the list")]
  UnknownCommand(String),

  #[error("invalid command format, usage: {0}")]
  Usage(&'static str),

  #[error("`{0}` is not a valid index; indices are positive integers")]
  BadIndex(String),

  #[error("unknown prefix `/{0}`")]
  UnknownPrefix(String),

  #[error("`/{0}` must come right after a `/course` value")]
  DanglingCourseDate(&'static str),

  #[error("`/{0}` may only be given once")]
  RepeatedPrefix(String),

  #[error("`/{0}` cannot be used here")]
  UnexpectedPrefix(String),

  #[error(transparent)]
  Core(#[from] netbook_core::Error),

  #[error("changes kept in memory but not saved: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
