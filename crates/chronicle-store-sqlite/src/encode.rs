//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings (always UTC, so string
//! ordering matches chronological ordering). Tags are stored as compact JSON.
//! UUIDs are stored as hyphenated lowercase strings. Enums are stored as
//! their lowercase discriminants.

use chrono::{DateTime, Utc};
use chronicle_core::{
  fact::{Category, Confidence, Fact, Importance},
  revision::{Revision, RevisionType},
  source::{Source, SourceTier},
  view::FactView,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Category ────────────────────────────────────────────────────────────────

pub fn encode_category(c: Category) -> &'static str {
  match c {
    Category::Economy => "economy",
    Category::Markets => "markets",
    Category::Geopolitics => "geopolitics",
    Category::Conflict => "conflict",
    Category::Technology => "technology",
    Category::Energy => "energy",
    Category::Climate => "climate",
    Category::Health => "health",
  }
}

pub fn decode_category(s: &str) -> Result<Category> {
  match s {
    "economy" => Ok(Category::Economy),
    "markets" => Ok(Category::Markets),
    "geopolitics" => Ok(Category::Geopolitics),
    "conflict" => Ok(Category::Conflict),
    "technology" => Ok(Category::Technology),
    "energy" => Ok(Category::Energy),
    "climate" => Ok(Category::Climate),
    "health" => Ok(Category::Health),
    other => Err(Error::UnknownEnumValue(other.to_owned())),
  }
}

// ─── Importance ──────────────────────────────────────────────────────────────

pub fn encode_importance(i: Importance) -> &'static str {
  match i {
    Importance::Breaking => "breaking",
    Importance::High => "high",
    Importance::Medium => "medium",
    Importance::Low => "low",
  }
}

pub fn decode_importance(s: &str) -> Result<Importance> {
  match s {
    "breaking" => Ok(Importance::Breaking),
    "high" => Ok(Importance::High),
    "medium" => Ok(Importance::Medium),
    "low" => Ok(Importance::Low),
    other => Err(Error::UnknownEnumValue(other.to_owned())),
  }
}

// ─── Confidence ──────────────────────────────────────────────────────────────

pub fn encode_confidence(c: Confidence) -> &'static str {
  match c {
    Confidence::Confirmed => "confirmed",
    Confidence::Developing => "developing",
    Confidence::Disputed => "disputed",
    Confidence::Retracted => "retracted",
  }
}

pub fn decode_confidence(s: &str) -> Result<Confidence> {
  match s {
    "confirmed" => Ok(Confidence::Confirmed),
    "developing" => Ok(Confidence::Developing),
    "disputed" => Ok(Confidence::Disputed),
    "retracted" => Ok(Confidence::Retracted),
    other => Err(Error::UnknownEnumValue(other.to_owned())),
  }
}

// ─── RevisionType ────────────────────────────────────────────────────────────

pub fn encode_revision_type(t: RevisionType) -> &'static str {
  match t {
    RevisionType::Initial => "initial",
    RevisionType::Update => "update",
    RevisionType::Correction => "correction",
    RevisionType::Escalation => "escalation",
    RevisionType::Resolution => "resolution",
  }
}

pub fn decode_revision_type(s: &str) -> Result<RevisionType> {
  match s {
    "initial" => Ok(RevisionType::Initial),
    "update" => Ok(RevisionType::Update),
    "correction" => Ok(RevisionType::Correction),
    "escalation" => Ok(RevisionType::Escalation),
    "resolution" => Ok(RevisionType::Resolution),
    other => Err(Error::UnknownEnumValue(other.to_owned())),
  }
}

// ─── SourceTier ──────────────────────────────────────────────────────────────

pub fn encode_tier(t: SourceTier) -> &'static str {
  match t {
    SourceTier::Primary => "primary",
    SourceTier::Wire => "wire",
    SourceTier::Reporting => "reporting",
    SourceTier::Analysis => "analysis",
  }
}

pub fn decode_tier(s: &str) -> Result<SourceTier> {
  match s {
    "primary" => Ok(SourceTier::Primary),
    "wire" => Ok(SourceTier::Wire),
    "reporting" => Ok(SourceTier::Reporting),
    "analysis" => Ok(SourceTier::Analysis),
    other => Err(Error::UnknownEnumValue(other.to_owned())),
  }
}

// ─── Tags ────────────────────────────────────────────────────────────────────

pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

pub fn decode_tags(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Write rows ──────────────────────────────────────────────────────────────

/// A [`Fact`] fully encoded for insertion; owned strings so the row can be
/// moved into a `tokio_rusqlite` closure.
pub struct FactRow {
  pub fact_id:       String,
  pub headline:      String,
  pub current_value: String,
  pub category:      String,
  pub importance:    String,
  pub confidence:    String,
  pub tags:          String,
  pub last_updated:  String,
  pub active:        bool,
}

impl FactRow {
  pub fn from_fact(f: &Fact) -> Result<Self> {
    Ok(Self {
      fact_id:       encode_uuid(f.fact_id),
      headline:      f.headline.clone(),
      current_value: f.current_value.clone(),
      category:      encode_category(f.category).to_owned(),
      importance:    encode_importance(f.importance).to_owned(),
      confidence:    encode_confidence(f.confidence).to_owned(),
      tags:          encode_tags(&f.tags)?,
      last_updated:  encode_dt(f.last_updated),
      active:        f.active,
    })
  }
}

/// A [`Revision`] fully encoded for insertion.
pub struct RevisionRow {
  pub revision_id:    String,
  pub fact_id:        String,
  pub previous_value: Option<String>,
  pub new_value:      String,
  pub delta:          String,
  pub why_it_matters: String,
  pub revision_type:  String,
  pub recorded_at:    String,
  pub source_name:    String,
  pub source_url:     Option<String>,
  pub source_tier:    String,
}

impl RevisionRow {
  pub fn from_revision(r: &Revision) -> Self {
    Self {
      revision_id:    encode_uuid(r.revision_id),
      fact_id:        encode_uuid(r.fact_id),
      previous_value: r.previous_value.clone(),
      new_value:      r.new_value.clone(),
      delta:          r.delta.clone(),
      why_it_matters: r.why_it_matters.clone(),
      revision_type:  encode_revision_type(r.revision_type).to_owned(),
      recorded_at:    encode_dt(r.recorded_at),
      source_name:    r.source_name.clone(),
      source_url:     r.source_url.clone(),
      source_tier:    encode_tier(r.source_tier).to_owned(),
    }
  }
}

// ─── Read rows ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `facts` row.
pub struct RawFact {
  pub fact_id:       String,
  pub headline:      String,
  pub current_value: String,
  pub category:      String,
  pub importance:    String,
  pub confidence:    String,
  pub tags:          String,
  pub last_updated:  String,
  pub active:        bool,
}

impl RawFact {
  pub fn into_fact(self) -> Result<Fact> {
    Ok(Fact {
      fact_id:       decode_uuid(&self.fact_id)?,
      headline:      self.headline,
      current_value: self.current_value,
      category:      decode_category(&self.category)?,
      importance:    decode_importance(&self.importance)?,
      confidence:    decode_confidence(&self.confidence)?,
      tags:          decode_tags(&self.tags)?,
      last_updated:  decode_dt(&self.last_updated)?,
      active:        self.active,
    })
  }
}

/// Raw strings read directly from a `revisions` row.
pub struct RawRevision {
  pub revision_id:    String,
  pub fact_id:        String,
  pub previous_value: Option<String>,
  pub new_value:      String,
  pub delta:          String,
  pub why_it_matters: String,
  pub revision_type:  String,
  pub recorded_at:    String,
  pub source_name:    String,
  pub source_url:     Option<String>,
  pub source_tier:    String,
}

impl RawRevision {
  pub fn into_revision(self) -> Result<Revision> {
    Ok(Revision {
      revision_id:    decode_uuid(&self.revision_id)?,
      fact_id:        decode_uuid(&self.fact_id)?,
      previous_value: self.previous_value,
      new_value:      self.new_value,
      delta:          self.delta,
      why_it_matters: self.why_it_matters,
      revision_type:  decode_revision_type(&self.revision_type)?,
      recorded_at:    decode_dt(&self.recorded_at)?,
      source_name:    self.source_name,
      source_url:     self.source_url,
      source_tier:    decode_tier(&self.source_tier)?,
    })
  }
}

/// Raw strings read directly from a `sources` row.
pub struct RawSource {
  pub source_id: String,
  pub name:      String,
  pub url:       Option<String>,
  pub tier:      String,
}

impl RawSource {
  pub fn into_source(self) -> Result<Source> {
    Ok(Source {
      source_id: decode_uuid(&self.source_id)?,
      name:      self.name,
      url:       self.url,
      tier:      decode_tier(&self.tier)?,
    })
  }
}

/// Everything needed to hydrate one fact, gathered inside a single
/// `tokio_rusqlite` closure and decoded afterwards.
pub struct RawFactView {
  pub fact:       RawFact,
  pub timeline:   Vec<RawRevision>,
  pub sources:    Vec<RawSource>,
  pub related:    Vec<String>,
  pub bookmarked: bool,
  pub muted:      bool,
}

impl RawFactView {
  pub fn into_view(self) -> Result<FactView> {
    Ok(FactView {
      fact:       self.fact.into_fact()?,
      timeline:   self
        .timeline
        .into_iter()
        .map(RawRevision::into_revision)
        .collect::<Result<_>>()?,
      sources:    self
        .sources
        .into_iter()
        .map(RawSource::into_source)
        .collect::<Result<_>>()?,
      related:    self
        .related
        .iter()
        .map(|s| decode_uuid(s))
        .collect::<Result<_>>()?,
      bookmarked: self.bookmarked,
      muted:      self.muted,
    })
  }
}
