//! Error type for `chronicle-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] chronicle_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown enum value in column: {0:?}")]
  UnknownEnumValue(String),

  /// A row inserted in the current transaction could not be read back.
  #[error("fact not found: {0}")]
  FactNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
