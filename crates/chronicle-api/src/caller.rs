//! Caller-identity extractor.
//!
//! Authentication itself lives upstream: the deployment fronts this service
//! with an authenticating proxy that strips any client-supplied `X-User-Id`
//! and injects the verified one. Here the header is only consumed — an
//! absent header is an anonymous caller, a malformed one is a client error.

use axum::{extract::FromRequestParts, http::request::Parts};
use chronicle_core::store::Caller;
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the verified user identifier.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor yielding the request's [`Caller`]. Never rejects merely for
/// being anonymous — write handlers decide whether identity is required.
pub struct CallerIdentity(pub Caller);

impl<S> FromRequestParts<S> for CallerIdentity
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Some(value) = parts.headers.get(USER_ID_HEADER) else {
      return Ok(Self(Caller::Anonymous));
    };

    let id = value
      .to_str()
      .ok()
      .and_then(|s| Uuid::parse_str(s).ok())
      .ok_or_else(|| {
        ApiError::BadRequest(format!("malformed {USER_ID_HEADER} header"))
      })?;

    Ok(Self(Caller::Identified(id)))
  }
}

/// Write operations require an identified caller.
pub fn require_identified(caller: Caller) -> Result<Uuid, ApiError> {
  caller.user_id().ok_or(ApiError::Unauthorized)
}
