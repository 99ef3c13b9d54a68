//! REST API for the device catalog, layout computation, and saved sessions.
//!
//! Routes:
//! - `GET /api/devices`: selectable catalog
//! - `POST /api/layout`: summary and layout for a site config
//! - `GET|POST /api/sessions`: list or create sessions
//! - `GET|DELETE /api/sessions/{id}`: fetch or remove one session

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::routing::{get, post};

use crate::session::MemoryStore;

pub use types::{CreateSessionRequest, ErrorResponse, LayoutResponse};

/// Application state shared across all request handlers.
///
/// Layout requests are pure and touch no state; only the session store is
/// behind a lock.
#[derive(Debug, Default)]
pub struct AppState {
    /// Sessions saved through this server.
    pub sessions: Mutex<MemoryStore>,
}

impl AppState {
    /// Creates state with an empty session store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/devices", get(handlers::list_devices))
        .route("/api/layout", post(handlers::compute_layout))
        .route(
            "/api/sessions",
            get(handlers::list_sessions).post(handlers::create_session),
        )
        .route(
            "/api/sessions/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
