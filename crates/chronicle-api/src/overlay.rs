//! Handlers for the per-user overlay: bookmarks and mutes.
//!
//! Each toggle is pure — the response reports the state after the call.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use chronicle_core::{store::FactStore, view::FactView};
use serde::Serialize;
use uuid::Uuid;

use crate::{
  caller::{CallerIdentity, require_identified},
  error::ApiError,
};

#[derive(Debug, Serialize)]
pub struct BookmarkState {
  pub bookmarked: bool,
}

#[derive(Debug, Serialize)]
pub struct MuteState {
  pub muted: bool,
}

/// `POST /facts/:id/bookmark` — 404 when the fact does not exist.
pub async fn toggle_bookmark<S>(
  State(store): State<Arc<S>>,
  CallerIdentity(caller): CallerIdentity,
  Path(id): Path<Uuid>,
) -> Result<Json<BookmarkState>, ApiError>
where
  S: FactStore + 'static,
{
  let user = require_identified(caller)?;
  let bookmarked = store
    .toggle_bookmark(user, id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("fact {id} not found")))?;
  Ok(Json(BookmarkState { bookmarked }))
}

/// `POST /facts/:id/mute` — 404 when the fact does not exist.
pub async fn toggle_mute<S>(
  State(store): State<Arc<S>>,
  CallerIdentity(caller): CallerIdentity,
  Path(id): Path<Uuid>,
) -> Result<Json<MuteState>, ApiError>
where
  S: FactStore + 'static,
{
  let user = require_identified(caller)?;
  let muted = store
    .toggle_mute(user, id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("fact {id} not found")))?;
  Ok(Json(MuteState { muted }))
}

/// `GET /bookmarks` — the caller's bookmarked facts, most recently
/// bookmarked first.
pub async fn list_bookmarks<S>(
  State(store): State<Arc<S>>,
  CallerIdentity(caller): CallerIdentity,
) -> Result<Json<Vec<FactView>>, ApiError>
where
  S: FactStore + 'static,
{
  let user = require_identified(caller)?;
  let items = store
    .user_bookmarks(user)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(items))
}
