//! Revision types — the append-only ledger entries behind each fact.
//!
//! A revision is an immutable record of one state transition. Revisions are
//! never updated or deleted; the ledger is only ever appended to, and only
//! read back newest-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, source::SourceTier};

// ─── RevisionType ────────────────────────────────────────────────────────────

/// What kind of transition a revision records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionType {
  /// The first entry in a fact's ledger. Exactly one per fact; the only
  /// revision permitted to have no `previous_value`.
  Initial,
  Update,
  Correction,
  Escalation,
  Resolution,
}

// ─── Revision ────────────────────────────────────────────────────────────────

/// One immutable, timestamped entry in a fact's ledger.
///
/// Attribution is inlined here so a revision stays self-describing even when
/// the per-use tier diverges from the outlet's registered tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revision {
  pub revision_id:    Uuid,
  pub fact_id:        Uuid,
  /// `None` only on the initial revision.
  pub previous_value: Option<String>,
  pub new_value:      String,
  /// Short human summary of what changed.
  pub delta:          String,
  /// Analytical context for the change.
  pub why_it_matters: String,
  pub revision_type:  RevisionType,
  pub recorded_at:    DateTime<Utc>,
  pub source_name:    String,
  pub source_url:     Option<String>,
  pub source_tier:    SourceTier,
}

// ─── NewRevision ─────────────────────────────────────────────────────────────

/// Input to the ledger write operations.
#[derive(Debug, Clone)]
pub struct NewRevision {
  pub previous_value: Option<String>,
  pub new_value:      String,
  pub delta:          String,
  pub why_it_matters: String,
  pub revision_type:  RevisionType,
  /// Defaults to now. Supplied explicitly when seeding a fact's history
  /// oldest-first with truthful timestamps.
  pub recorded_at:    Option<DateTime<Utc>>,
  pub source_name:    String,
  pub source_url:     Option<String>,
  pub source_tier:    SourceTier,
}

impl NewRevision {
  /// Contract for the revision accompanying fact creation: it must be
  /// `Initial` and must not carry a prior value.
  pub fn check_initial(&self) -> Result<()> {
    if self.revision_type != RevisionType::Initial {
      return Err(Error::ExpectedInitialRevision(self.revision_type));
    }
    if self.previous_value.is_some() {
      return Err(Error::InitialWithPreviousValue);
    }
    Ok(())
  }

  /// Contract for appended revisions: `Initial` is reserved for creation,
  /// and every later revision records the value it transitioned from.
  /// Whether that recorded value matches the fact's actual projection is
  /// not checked — the ledger trusts the caller.
  pub fn check_followup(&self) -> Result<()> {
    if self.revision_type == RevisionType::Initial {
      return Err(Error::DuplicateInitialRevision);
    }
    if self.previous_value.is_none() {
      return Err(Error::MissingPreviousValue);
    }
    Ok(())
  }

  /// Materialise into a [`Revision`] owned by `fact_id`, stamping
  /// `recorded_at` with `now` when the input left it unset.
  pub fn into_revision(self, fact_id: Uuid, now: DateTime<Utc>) -> Revision {
    Revision {
      revision_id:    Uuid::new_v4(),
      fact_id,
      previous_value: self.previous_value,
      new_value:      self.new_value,
      delta:          self.delta,
      why_it_matters: self.why_it_matters,
      revision_type:  self.revision_type,
      recorded_at:    self.recorded_at.unwrap_or(now),
      source_name:    self.source_name,
      source_url:     self.source_url,
      source_tier:    self.source_tier,
    }
  }
}
