//! Request handlers for the API endpoints.

use std::sync::{Arc, MutexGuard, PoisonError};

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::types::{CreateSessionRequest, ErrorResponse, LayoutResponse, OkResponse};
use crate::catalog::{self, DeviceSpec};
use crate::session::{MemoryStore, Session, SessionError, SessionStore};
use crate::site::layout;
use crate::site::summary::SiteSummary;
use crate::site::types::SiteConfig;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: SessionError) -> ApiError {
    let status = match err {
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::InvalidName => StatusCode::BAD_REQUEST,
        _ => {
            warn!(error = %err, "session store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// A panicked handler cannot leave the in-memory store half-written, so a
/// poisoned lock is still safe to use.
fn sessions(state: &AppState) -> MutexGuard<'_, MemoryStore> {
    state
        .sessions
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// `GET /api/devices` → 200 + selectable catalog (no transformer).
pub async fn list_devices() -> Json<Vec<&'static DeviceSpec>> {
    Json(catalog::selectable().collect())
}

/// `POST /api/layout` → 200 + `LayoutResponse`.
///
/// Unknown device ids are skipped, never rejected.
pub async fn compute_layout(Json(config): Json<SiteConfig>) -> Json<LayoutResponse> {
    let layout = layout::compute_layout(&config.selections);
    let summary = SiteSummary::new(&config.selections, &layout);
    Json(LayoutResponse { summary, layout })
}

/// `POST /api/sessions` → 200 + `Session`, or 400 for a blank name.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<Session>, ApiError> {
    sessions(&state)
        .save(&req.name, req.config)
        .map(Json)
        .map_err(error_response)
}

/// `GET /api/sessions` → 200 + sessions, newest first.
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Session>>, ApiError> {
    sessions(&state).list().map(Json).map_err(error_response)
}

/// `GET /api/sessions/{id}` → 200 + `Session`, or 404.
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Session>, ApiError> {
    sessions(&state).get(id).map(Json).map_err(error_response)
}

/// `DELETE /api/sessions/{id}` → 200 + `{"ok": true}`, or 404.
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<OkResponse>, ApiError> {
    sessions(&state)
        .delete(id)
        .map(|()| Json(OkResponse { ok: true }))
        .map_err(error_response)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;

    async fn send(state: Arc<AppState>, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = router(state).oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn devices_exclude_transformer() {
        let req = Request::builder()
            .uri("/api/devices")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(Arc::new(AppState::new()), req).await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["megapack-xl", "megapack-2", "megapack", "powerpack"]);
    }

    #[tokio::test]
    async fn layout_returns_summary_and_items() {
        let req = post_json(
            "/api/layout",
            r#"{"selections":[{"deviceId":"megapack","quantity":2}]}"#,
        );
        let (status, json) = send(Arc::new(AppState::new()), req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["summary"]["totalCost"], 110_000);
        assert_eq!(json["summary"]["transformers"], 1);
        assert_eq!(json["layout"]["items"].as_array().unwrap().len(), 3);
        assert_eq!(json["layout"]["totalWidth"], 70);
        assert_eq!(json["layout"]["totalDepth"], 10);
    }

    #[tokio::test]
    async fn blank_session_name_returns_400() {
        let req = post_json("/api/sessions", r#"{"name":"  ","config":{"selections":[]}}"#);
        let (status, json) = send(Arc::new(AppState::new()), req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn missing_session_returns_404() {
        let state = Arc::new(AppState::new());
        let get = Request::builder()
            .uri("/api/sessions/42")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(state.clone(), get).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let delete = Request::builder()
            .method("DELETE")
            .uri("/api/sessions/42")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(state, delete).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json.get("error").is_some());
    }
}
