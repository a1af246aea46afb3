//! The `FactStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `chronicle-store-sqlite`). Higher layers (`chronicle-api`,
//! `chronicle-server`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  fact::{Category, Confidence, Importance, NewFact},
  revision::NewRevision,
  source::{Source, SourceRef},
  view::{CategoryStats, FactPage, FactView},
};

// ─── Caller ──────────────────────────────────────────────────────────────────

/// The resolved identity of the requesting user, supplied by an external
/// auth collaborator. Threaded explicitly through every read path so the
/// logged-out branch is exhaustive at each call site — never a nullable
/// field, never ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
  Identified(Uuid),
  Anonymous,
}

impl Caller {
  pub fn user_id(self) -> Option<Uuid> {
    match self {
      Self::Identified(id) => Some(id),
      Self::Anonymous => None,
    }
  }
}

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`FactStore::list_facts`]. Each classification filter is
/// an exact match; listing is always restricted to active facts.
#[derive(Debug, Clone)]
pub struct FactFilter {
  pub category:   Option<Category>,
  pub importance: Option<Importance>,
  pub confidence: Option<Confidence>,
  pub limit:      usize,
  pub offset:     usize,
}

impl Default for FactFilter {
  fn default() -> Self {
    Self {
      category:   None,
      importance: None,
      confidence: None,
      limit:      20,
      offset:     0,
    }
  }
}

/// Explicit projection update accompanying an appended revision. Only the
/// fields named here are overwritten on the fact; omitted fields retain
/// their prior value. The projection is never derived from the ledger tail.
#[derive(Debug, Clone, Default)]
pub struct RevisionEffects {
  pub current_value: Option<String>,
  pub confidence:    Option<Confidence>,
  pub importance:    Option<Importance>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Chronicle storage backend.
///
/// The revision ledger is append-only: revisions are never updated or
/// deleted. Multi-table writes (`create_fact`, `add_revision`,
/// `link_related`) are each a single atomic unit — a failure part-way
/// through leaves no partial state behind.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait FactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Source registry ───────────────────────────────────────────────────

  /// Resolve an outlet by exact name, creating it if absent. First write
  /// wins: an existing outlet's url and tier are never updated.
  fn upsert_source(
    &self,
    source: SourceRef,
  ) -> impl Future<Output = Result<Source, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Create a fact together with its initial revision and source links, in
  /// one atomic transaction. Returns the hydrated view for `caller`.
  ///
  /// Fails before any write if `sources` is empty, if the revision is not
  /// [`Initial`](crate::revision::RevisionType::Initial), or if it carries
  /// a `previous_value`.
  fn create_fact(
    &self,
    fact: NewFact,
    initial: NewRevision,
    sources: Vec<SourceRef>,
    caller: Caller,
  ) -> impl Future<Output = Result<FactView, Self::Error>> + Send + '_;

  /// Append a revision to an existing fact's ledger, bump `last_updated`,
  /// apply `effects` to the projection, and idempotently link the
  /// revision's source — one atomic transaction. Returns `None` when
  /// `fact_id` does not reference an existing fact.
  ///
  /// The recorded `previous_value` is not cross-checked against the fact's
  /// actual projection; concurrent appends to the same fact are the
  /// caller's responsibility to serialise.
  fn add_revision(
    &self,
    fact_id: Uuid,
    revision: NewRevision,
    effects: RevisionEffects,
    caller: Caller,
  ) -> impl Future<Output = Result<Option<FactView>, Self::Error>> + Send + '_;

  /// Idempotently link two facts with an undirected relation, stored as
  /// both directed edges in one transaction. Referencing a missing fact is
  /// an integrity error, reported rather than swallowed.
  fn link_related(
    &self,
    fact_id: Uuid,
    related_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Soft-delete: clear the `active` flag. Returns `false` when the fact
  /// does not exist. The fact and its ledger remain readable by id.
  fn deactivate_fact(
    &self,
    fact_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── User overlay ──────────────────────────────────────────────────────

  /// Pure toggle: set the bookmark if absent (`Some(true)`), clear it if
  /// present (`Some(false)`). No explicit false state is stored. Returns
  /// `None` when `fact_id` does not reference an existing fact.
  fn toggle_bookmark(
    &self,
    user_id: Uuid,
    fact_id: Uuid,
  ) -> impl Future<Output = Result<Option<bool>, Self::Error>> + Send + '_;

  /// Same toggle semantics as [`FactStore::toggle_bookmark`].
  fn toggle_mute(
    &self,
    user_id: Uuid,
    fact_id: Uuid,
  ) -> impl Future<Output = Result<Option<bool>, Self::Error>> + Send + '_;

  /// All facts the user has bookmarked, in bookmark-creation order (most
  /// recent first) — ordering is driven by the overlay rows, not the fact
  /// rows.
  fn user_bookmarks(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<FactView>, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Hydrate one fact. Returns `None` if not found.
  fn get_fact(
    &self,
    fact_id: Uuid,
    caller: Caller,
  ) -> impl Future<Output = Result<Option<FactView>, Self::Error>> + Send + '_;

  /// Filtered page of active facts ordered by `last_updated` descending.
  /// `total` reflects the same predicate, computed independently of the
  /// page.
  fn list_facts(
    &self,
    filter: FactFilter,
    caller: Caller,
  ) -> impl Future<Output = Result<FactPage, Self::Error>> + Send + '_;

  /// Up to `limit` active facts ranked by revision count within the
  /// trailing 24-hour window, hydrated in that order. When no fact has a
  /// revision in the window, falls back to the most recently updated
  /// active facts instead of returning an empty set.
  fn trending(
    &self,
    limit: usize,
    caller: Caller,
  ) -> impl Future<Output = Result<Vec<FactView>, Self::Error>> + Send + '_;

  /// All active facts with [`Confidence::Disputed`], `last_updated`
  /// descending. Unbounded — the disputed set is assumed small.
  fn disputed(
    &self,
    caller: Caller,
  ) -> impl Future<Output = Result<Vec<FactView>, Self::Error>> + Send + '_;

  /// Case-insensitive substring search over fact headline, current value
  /// and tags, unioned with facts reached through revision text
  /// (delta, why-it-matters, new value). Each fact appears exactly once;
  /// fact-level matches come first, ordered by `last_updated` descending.
  fn search<'a>(
    &'a self,
    query: &'a str,
    caller: Caller,
  ) -> impl Future<Output = Result<Vec<FactView>, Self::Error>> + Send + 'a;

  /// Aggregate counts per category over active facts. Categories with no
  /// active facts are omitted.
  fn category_stats(
    &self,
  ) -> impl Future<Output = Result<Vec<CategoryStats>, Self::Error>> + Send + '_;
}
