//! Hydrated read models — never stored, always composed on read.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{fact::{Category, Fact}, revision::Revision, source::Source};

// ─── FactView ────────────────────────────────────────────────────────────────

/// The full detail projection of a fact: the aggregate row, its complete
/// timeline, its currently attributed outlets, its relations, and the
/// caller's overlay flags.
///
/// Hydration is a pure read composition — assembling a view never mutates
/// any underlying table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactView {
  #[serde(flatten)]
  pub fact:       Fact,
  /// All revisions, newest first.
  pub timeline:   Vec<Revision>,
  /// Outlets currently backing the fact, via the link table. Independent of
  /// the per-revision inline attribution.
  pub sources:    Vec<Source>,
  /// Identifiers of related facts. Relations are undirected; outgoing edges
  /// are sufficient because links are always written in both directions.
  pub related:    Vec<Uuid>,
  /// `false` unless the caller is identified and has the mark set.
  pub bookmarked: bool,
  pub muted:      bool,
}

// ─── FactPage ────────────────────────────────────────────────────────────────

/// One page of hydrated facts plus the total count matching the same filter
/// predicate, independent of limit and offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactPage {
  pub items: Vec<FactView>,
  pub total: u64,
}

// ─── CategoryStats ───────────────────────────────────────────────────────────

/// Per-category aggregate over active facts. Categories with zero active
/// facts are omitted entirely, not zero-filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
  pub category:      Category,
  /// Active facts in the category.
  pub count:         u64,
  /// Of those, how many were updated within the trailing 24 hours.
  pub updates_today: u64,
}
