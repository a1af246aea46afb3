//! Handlers for `/facts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/facts` | Optional `category`, `importance`, `confidence`, `limit`, `offset` |
//! | `POST`   | `/facts` | Body: [`CreateFactBody`]; returns 201 + hydrated fact |
//! | `GET`    | `/facts/:id` | Full hydrated detail |
//! | `DELETE` | `/facts/:id` | Soft-delete (deactivate) |
//! | `POST`   | `/facts/:id/revisions` | Body: [`AppendRevisionBody`] |
//! | `POST`   | `/facts/:id/related` | Body: `{"related_fact_id":"..."}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use chronicle_core::{
  fact::{Category, Confidence, Importance, NewFact},
  revision::{NewRevision, RevisionType},
  source::{SourceRef, SourceTier},
  store::{FactFilter, FactStore, RevisionEffects},
  view::{FactPage, FactView},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  caller::{CallerIdentity, require_identified},
  error::ApiError,
};

// ─── List ─────────────────────────────────────────────────────────────────────

fn default_limit() -> usize { 20 }

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub category:   Option<Category>,
  pub importance: Option<Importance>,
  pub confidence: Option<Confidence>,
  #[serde(default = "default_limit")]
  pub limit:      usize,
  #[serde(default)]
  pub offset:     usize,
}

/// `GET /facts[?category=...][&importance=...][&confidence=...][&limit=20][&offset=0]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  CallerIdentity(caller): CallerIdentity,
  Query(params): Query<ListParams>,
) -> Result<Json<FactPage>, ApiError>
where
  S: FactStore + 'static,
{
  let filter = FactFilter {
    category:   params.category,
    importance: params.importance,
    confidence: params.confidence,
    limit:      params.limit,
    offset:     params.offset,
  };
  let page = store
    .list_facts(filter, caller)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(page))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /facts/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  CallerIdentity(caller): CallerIdentity,
  Path(id): Path<Uuid>,
) -> Result<Json<FactView>, ApiError>
where
  S: FactStore + 'static,
{
  let view = store
    .get_fact(id, caller)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("fact {id} not found")))?;
  Ok(Json(view))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// Revision fields shared by creation and append bodies.
#[derive(Debug, Deserialize)]
pub struct RevisionBody {
  pub previous_value: Option<String>,
  pub new_value:      String,
  pub delta:          String,
  pub why_it_matters: String,
  pub revision_type:  RevisionType,
  pub recorded_at:    Option<DateTime<Utc>>,
  pub source_name:    String,
  pub source_url:     Option<String>,
  pub source_tier:    SourceTier,
}

impl From<RevisionBody> for NewRevision {
  fn from(b: RevisionBody) -> Self {
    NewRevision {
      previous_value: b.previous_value,
      new_value:      b.new_value,
      delta:          b.delta,
      why_it_matters: b.why_it_matters,
      revision_type:  b.revision_type,
      recorded_at:    b.recorded_at,
      source_name:    b.source_name,
      source_url:     b.source_url,
      source_tier:    b.source_tier,
    }
  }
}

/// JSON body accepted by `POST /facts`.
#[derive(Debug, Deserialize)]
pub struct CreateFactBody {
  pub headline:         String,
  pub current_value:    String,
  pub category:         Category,
  pub importance:       Importance,
  pub confidence:       Confidence,
  #[serde(default)]
  pub tags:             Vec<String>,
  pub initial_revision: RevisionBody,
  pub sources:          Vec<SourceRef>,
}

/// `POST /facts` — returns 201 + the hydrated [`FactView`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  CallerIdentity(caller): CallerIdentity,
  Json(body): Json<CreateFactBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FactStore + 'static,
{
  require_identified(caller)?;

  // Reject malformed input before the store is touched.
  if body.sources.is_empty() {
    return Err(ApiError::BadRequest(
      "a fact must cite at least one source".into(),
    ));
  }
  let initial = NewRevision::from(body.initial_revision);
  initial
    .check_initial()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let fact = NewFact {
    headline:      body.headline,
    current_value: body.current_value,
    category:      body.category,
    importance:    body.importance,
    confidence:    body.confidence,
    tags:          body.tags,
  };

  let view = store
    .create_fact(fact, initial, body.sources, caller)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(view)))
}

// ─── Append revision ──────────────────────────────────────────────────────────

/// JSON body accepted by `POST /facts/:id/revisions`. The revision fields
/// sit at the top level; the `new_*` fields name exactly which projection
/// fields to overwrite — omitted fields retain their prior value.
#[derive(Debug, Deserialize)]
pub struct AppendRevisionBody {
  #[serde(flatten)]
  pub revision:          RevisionBody,
  pub new_current_value: Option<String>,
  pub new_confidence:    Option<Confidence>,
  pub new_importance:    Option<Importance>,
}

/// `POST /facts/:id/revisions`
pub async fn append_revision<S>(
  State(store): State<Arc<S>>,
  CallerIdentity(caller): CallerIdentity,
  Path(id): Path<Uuid>,
  Json(body): Json<AppendRevisionBody>,
) -> Result<Json<FactView>, ApiError>
where
  S: FactStore + 'static,
{
  require_identified(caller)?;

  let revision = NewRevision::from(body.revision);
  revision
    .check_followup()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let effects = RevisionEffects {
    current_value: body.new_current_value,
    confidence:    body.new_confidence,
    importance:    body.new_importance,
  };

  let view = store
    .add_revision(id, revision, effects, caller)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("fact {id} not found")))?;
  Ok(Json(view))
}

// ─── Relations ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RelatedBody {
  pub related_fact_id: Uuid,
}

/// `POST /facts/:id/related` — body: `{"related_fact_id":"..."}`.
pub async fn link_related<S>(
  State(store): State<Arc<S>>,
  CallerIdentity(caller): CallerIdentity,
  Path(id): Path<Uuid>,
  Json(body): Json<RelatedBody>,
) -> Result<StatusCode, ApiError>
where
  S: FactStore + 'static,
{
  require_identified(caller)?;
  store
    .link_related(id, body.related_fact_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Deactivate ───────────────────────────────────────────────────────────────

/// `DELETE /facts/:id` — soft-delete; the fact stays readable by id.
pub async fn deactivate<S>(
  State(store): State<Arc<S>>,
  CallerIdentity(caller): CallerIdentity,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: FactStore + 'static,
{
  require_identified(caller)?;
  let existed = store
    .deactivate_fact(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !existed {
    return Err(ApiError::NotFound(format!("fact {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
