//! Handlers for the feed-oriented read endpoints: trending, disputed, and
//! per-category statistics.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use chronicle_core::{
  store::FactStore,
  view::{CategoryStats, FactView},
};
use serde::Deserialize;

use crate::{caller::CallerIdentity, error::ApiError};

// ─── Trending ─────────────────────────────────────────────────────────────────

fn default_trending_limit() -> usize { 5 }

#[derive(Debug, Deserialize)]
pub struct TrendingParams {
  #[serde(default = "default_trending_limit")]
  pub limit: usize,
}

/// `GET /facts/trending[?limit=5]` — most-revised facts in the trailing
/// 24 hours; falls back to recency when the window is quiet.
pub async fn trending<S>(
  State(store): State<Arc<S>>,
  CallerIdentity(caller): CallerIdentity,
  Query(params): Query<TrendingParams>,
) -> Result<Json<Vec<FactView>>, ApiError>
where
  S: FactStore + 'static,
{
  let items = store
    .trending(params.limit, caller)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(items))
}

// ─── Disputed ─────────────────────────────────────────────────────────────────

/// `GET /facts/disputed`
pub async fn disputed<S>(
  State(store): State<Arc<S>>,
  CallerIdentity(caller): CallerIdentity,
) -> Result<Json<Vec<FactView>>, ApiError>
where
  S: FactStore + 'static,
{
  let items = store
    .disputed(caller)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(items))
}

// ─── Category stats ───────────────────────────────────────────────────────────

/// `GET /categories/stats` — categories with no active facts are omitted.
pub async fn category_stats<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<CategoryStats>>, ApiError>
where
  S: FactStore + 'static,
{
  let stats = store
    .category_stats()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(stats))
}
