//! API request and response bodies.

use serde::{Deserialize, Serialize};

use crate::site::summary::SiteSummary;
use crate::site::types::{LayoutResult, SiteConfig};

/// Body of `POST /api/sessions`.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Display name (must not be blank).
    pub name: String,
    /// Site configuration to store.
    #[serde(default)]
    pub config: SiteConfig,
}

/// Body of `POST /api/layout` responses.
#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    /// Totals, transformer count, and land size.
    pub summary: SiteSummary,
    /// Placed units and bounding dimensions.
    pub layout: LayoutResult,
}

/// Error response body for 4xx/5xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
