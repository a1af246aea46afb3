//! Handler for `GET /search`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use chronicle_core::{store::FactStore, view::FactView};
use serde::Deserialize;

use crate::{caller::CallerIdentity, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  /// Substring matched case-insensitively against fact and revision text.
  pub q: String,
}

/// `GET /search?q=...`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  CallerIdentity(caller): CallerIdentity,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<FactView>>, ApiError>
where
  S: FactStore + 'static,
{
  let items = store
    .search(&params.q, caller)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(items))
}
