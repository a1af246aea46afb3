//! Fact types — the mutable aggregate root of the Chronicle store.
//!
//! A fact carries a denormalised "current state" projected from an immutable,
//! ordered sequence of revisions. The projection fields change only when a
//! write names them explicitly; they are never re-derived from the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Classification ──────────────────────────────────────────────────────────

/// The topical domain a fact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Economy,
  Markets,
  Geopolitics,
  Conflict,
  Technology,
  Energy,
  Climate,
  Health,
}

/// How prominently a fact should surface in a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
  Breaking,
  High,
  Medium,
  Low,
}

/// The evidentiary standing of a fact's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
  Confirmed,
  Developing,
  Disputed,
  Retracted,
}

// ─── Fact ────────────────────────────────────────────────────────────────────

/// A tracked real-world claim. `current_value`, `confidence` and
/// `importance` are a projection maintained by explicit writes; the full
/// history lives in the revision ledger.
///
/// Facts are never hard-deleted — `active` is a soft-delete flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
  pub fact_id:       Uuid,
  pub headline:      String,
  pub current_value: String,
  pub category:      Category,
  pub importance:    Importance,
  pub confidence:    Confidence,
  pub tags:          Vec<String>,
  /// Monotonically non-decreasing; bumped on every appended revision.
  pub last_updated:  DateTime<Utc>,
  pub active:        bool,
}

// ─── NewFact ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::FactStore::create_fact`]. The identifier,
/// `last_updated` and `active` flag are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewFact {
  pub headline:      String,
  pub current_value: String,
  pub category:      Category,
  pub importance:    Importance,
  pub confidence:    Confidence,
  pub tags:          Vec<String>,
}
