//! Error types for `chronicle-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::revision::RevisionType;

#[derive(Debug, Error)]
pub enum Error {
  #[error("fact not found: {0}")]
  FactNotFound(Uuid),

  #[error("a fact must cite at least one source")]
  EmptySourceList,

  #[error("an initial revision cannot carry a previous value")]
  InitialWithPreviousValue,

  #[error("fact creation requires an initial revision, got {0:?}")]
  ExpectedInitialRevision(RevisionType),

  #[error("a fact already has its initial revision")]
  DuplicateInitialRevision,

  #[error("a non-initial revision must record the value it replaced")]
  MissingPreviousValue,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
