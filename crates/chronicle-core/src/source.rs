//! Source types — normalised outlet identity.
//!
//! Outlets are deduplicated by exact name. They are created lazily on first
//! reference and never deleted by the core; orphans are acceptable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── SourceTier ──────────────────────────────────────────────────────────────

/// An outlet's evidentiary class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTier {
  /// Official or first-party (central banks, government releases).
  Primary,
  /// Wire services.
  Wire,
  /// Original reporting.
  Reporting,
  /// Commentary and analysis.
  Analysis,
}

// ─── Source ──────────────────────────────────────────────────────────────────

/// A registered outlet. `tier` and `url` are properties of the outlet as
/// first registered — an upsert with a matching name never updates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
  pub source_id: Uuid,
  pub name:      String,
  pub url:       Option<String>,
  pub tier:      SourceTier,
}

// ─── SourceRef ───────────────────────────────────────────────────────────────

/// Write-side reference to an outlet, resolved by name on upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
  pub name: String,
  pub url:  Option<String>,
  pub tier: SourceTier,
}
