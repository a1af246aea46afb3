//! JSON REST API for Chronicle.
//!
//! Exposes an axum [`Router`] backed by any [`chronicle_core::store::FactStore`].
//! Authentication, TLS, and transport concerns are the caller's
//! responsibility; the verified user identity arrives as a header (see
//! [`caller`]).
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", chronicle_api::api_router(store.clone()))
//! ```

pub mod caller;
pub mod error;
pub mod facts;
pub mod feed;
pub mod overlay;
pub mod search;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use chronicle_core::store::FactStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FactStore + 'static,
{
  Router::new()
    // Facts — static segments before the capture so they never shadow it.
    .route("/facts", get(facts::list::<S>).post(facts::create::<S>))
    .route("/facts/trending", get(feed::trending::<S>))
    .route("/facts/disputed", get(feed::disputed::<S>))
    .route(
      "/facts/{id}",
      get(facts::get_one::<S>).delete(facts::deactivate::<S>),
    )
    .route("/facts/{id}/revisions", post(facts::append_revision::<S>))
    .route("/facts/{id}/related", post(facts::link_related::<S>))
    // Overlay
    .route("/facts/{id}/bookmark", post(overlay::toggle_bookmark::<S>))
    .route("/facts/{id}/mute", post(overlay::toggle_mute::<S>))
    .route("/bookmarks", get(overlay::list_bookmarks::<S>))
    // Queries
    .route("/search", get(search::handler::<S>))
    .route("/categories/stats", get(feed::category_stats::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use chronicle_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::*;

  async fn router() -> Router<()> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  fn create_body(headline: &str) -> Value {
    json!({
      "headline": headline,
      "current_value": "5%",
      "category": "economy",
      "importance": "high",
      "confidence": "confirmed",
      "tags": ["rates"],
      "initial_revision": {
        "new_value": "5%",
        "delta": "Tracking begins at 5%",
        "why_it_matters": "Baseline for the series.",
        "revision_type": "initial",
        "source_name": "Reuters",
        "source_tier": "wire"
      },
      "sources": [{"name": "Reuters", "tier": "wire"}]
    })
  }

  async fn send(
    app: &Router<()>,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(u) = user {
      builder = builder.header("x-user-id", u);
    }
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  // ── Identity ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn anonymous_write_is_unauthorized() {
    let app = router().await;
    let (status, _) =
      send(&app, "POST", "/facts", None, Some(create_body("CPI"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn malformed_user_header_is_bad_request() {
    let app = router().await;
    let (status, _) = send(
      &app,
      "POST",
      "/facts",
      Some("not-a-uuid"),
      Some(create_body("CPI")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Create / read round trip ────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_get_by_id() {
    let app = router().await;
    let user = Uuid::new_v4().to_string();

    let (status, created) = send(
      &app,
      "POST",
      "/facts",
      Some(&user),
      Some(create_body("Policy rate")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["headline"], "Policy rate");
    assert_eq!(created["timeline"].as_array().unwrap().len(), 1);
    assert_eq!(created["sources"].as_array().unwrap().len(), 1);

    let id = created["fact_id"].as_str().unwrap();
    let (status, fetched) =
      send(&app, "GET", &format!("/facts/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["fact_id"], created["fact_id"]);
    assert_eq!(fetched["bookmarked"], false);
  }

  #[tokio::test]
  async fn get_unknown_fact_is_404() {
    let app = router().await;
    let (status, _) = send(
      &app,
      "GET",
      &format!("/facts/{}", Uuid::new_v4()),
      None,
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn create_without_sources_is_rejected() {
    let app = router().await;
    let user = Uuid::new_v4().to_string();
    let mut body = create_body("No sources");
    body["sources"] = json!([]);

    let (status, err) =
      send(&app, "POST", "/facts", Some(&user), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].as_str().unwrap().contains("source"));
  }

  // ── Revisions ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn append_revision_updates_projection() {
    let app = router().await;
    let user = Uuid::new_v4().to_string();

    let (_, created) = send(
      &app,
      "POST",
      "/facts",
      Some(&user),
      Some(create_body("Policy rate")),
    )
    .await;
    let id = created["fact_id"].as_str().unwrap();

    let (status, updated) = send(
      &app,
      "POST",
      &format!("/facts/{id}/revisions"),
      Some(&user),
      Some(json!({
        "previous_value": "5%",
        "new_value": "6%",
        "delta": "Raised by 100bp",
        "why_it_matters": "Fastest hike of the cycle.",
        "revision_type": "update",
        "source_name": "Bloomberg",
        "source_tier": "reporting",
        "new_current_value": "6%"
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["current_value"], "6%");
    assert_eq!(updated["timeline"].as_array().unwrap().len(), 2);
    assert_eq!(updated["sources"].as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn append_revision_to_unknown_fact_is_404() {
    let app = router().await;
    let user = Uuid::new_v4().to_string();
    let (status, _) = send(
      &app,
      "POST",
      &format!("/facts/{}/revisions", Uuid::new_v4()),
      Some(&user),
      Some(json!({
        "previous_value": "5%",
        "new_value": "6%",
        "delta": "d",
        "why_it_matters": "w",
        "revision_type": "update",
        "source_name": "Reuters",
        "source_tier": "wire"
      })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Overlay ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn bookmark_toggles_and_lists() {
    let app = router().await;
    let user = Uuid::new_v4().to_string();

    let (_, created) = send(
      &app,
      "POST",
      "/facts",
      Some(&user),
      Some(create_body("Marked")),
    )
    .await;
    let id = created["fact_id"].as_str().unwrap();

    let uri = format!("/facts/{id}/bookmark");
    let (status, first) = send(&app, "POST", &uri, Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["bookmarked"], true);

    let (_, listed) = send(&app, "GET", "/bookmarks", Some(&user), None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (_, second) = send(&app, "POST", &uri, Some(&user), None).await;
    assert_eq!(second["bookmarked"], false);

    let (_, listed) = send(&app, "GET", "/bookmarks", Some(&user), None).await;
    assert!(listed.as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn toggles_on_unknown_fact_are_404() {
    let app = router().await;
    let user = Uuid::new_v4().to_string();

    let (status, _) = send(
      &app,
      "POST",
      &format!("/facts/{}/bookmark", Uuid::new_v4()),
      Some(&user),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
      &app,
      "POST",
      &format!("/facts/{}/mute", Uuid::new_v4()),
      Some(&user),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn bookmarks_require_identity() {
    let app = router().await;
    let (status, _) = send(&app, "GET", "/bookmarks", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  // ── Queries ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_reports_filtered_total() {
    let app = router().await;
    let user = Uuid::new_v4().to_string();
    for headline in ["CPI", "GDP"] {
      send(&app, "POST", "/facts", Some(&user), Some(create_body(headline)))
        .await;
    }

    let (status, page) =
      send(&app, "GET", "/facts?category=economy&limit=1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["total"], 2);

    let (_, empty) =
      send(&app, "GET", "/facts?category=health", None, None).await;
    assert_eq!(empty["total"], 0);
  }

  #[tokio::test]
  async fn trending_is_routable_alongside_id_capture() {
    let app = router().await;
    let user = Uuid::new_v4().to_string();
    send(&app, "POST", "/facts", Some(&user), Some(create_body("Busy")))
      .await;

    let (status, items) =
      send(&app, "GET", "/facts/trending?limit=3", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn search_returns_matches() {
    let app = router().await;
    let user = Uuid::new_v4().to_string();
    send(
      &app,
      "POST",
      "/facts",
      Some(&user),
      Some(create_body("Inflation cools")),
    )
    .await;

    let (status, hits) =
      send(&app, "GET", "/search?q=inflation", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.as_array().unwrap().len(), 1);

    let (_, misses) = send(&app, "GET", "/search?q=zzz", None, None).await;
    assert!(misses.as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn category_stats_reflect_active_facts() {
    let app = router().await;
    let user = Uuid::new_v4().to_string();
    send(&app, "POST", "/facts", Some(&user), Some(create_body("CPI")))
      .await;

    let (status, stats) =
      send(&app, "GET", "/categories/stats", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let stats = stats.as_array().unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["category"], "economy");
    assert_eq!(stats[0]["count"], 1);
  }
}
