//! Shareable links: a selection list packed into a URL fragment.
//!
//! The token is the JSON selection array encoded as URL-safe base64 without
//! padding. Decoding also accepts the standard padded alphabet so links
//! produced by the web client keep working.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use thiserror::Error;
use tracing::warn;

use crate::site::types::DeviceSelection;

/// Failure to turn a token back into selections.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share token is empty")]
    Empty,
    #[error("share token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("share token does not contain a selection list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encodes selections into a URL-safe token.
pub fn encode_token(selections: &[DeviceSelection]) -> String {
    // Serializing plain strings and integers cannot fail.
    let json = serde_json::to_vec(selections).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decodes a token produced by [`encode_token`] or by the web client.
///
/// # Errors
///
/// Returns a `ShareError` if the token is empty, not base64, or not a JSON
/// selection array.
pub fn decode_token(token: &str) -> Result<Vec<DeviceSelection>, ShareError> {
    parse_token(token.trim()).inspect_err(|e| {
        warn!(error = %e, "rejected share token");
    })
}

fn parse_token(token: &str) -> Result<Vec<DeviceSelection>, ShareError> {
    if token.is_empty() {
        return Err(ShareError::Empty);
    }

    let bytes = match URL_SAFE_NO_PAD.decode(token) {
        Ok(bytes) => bytes,
        Err(_) => STANDARD.decode(token)?,
    };
    Ok(serde_json::from_slice(&bytes)?)
}

/// Builds a share link by placing the token in the fragment of `base_url`.
///
/// Any existing fragment is replaced.
pub fn share_url(base_url: &str, selections: &[DeviceSelection]) -> String {
    let base = base_url.split_once('#').map_or(base_url, |(b, _)| b);
    format!("{base}#{}", encode_token(selections))
}

/// Extracts selections from a share link.
///
/// Returns `Ok(None)` when the URL carries no fragment or an empty one.
///
/// # Errors
///
/// Returns a `ShareError` if the fragment is present but cannot be decoded.
pub fn decode_url(url: &str) -> Result<Option<Vec<DeviceSelection>>, ShareError> {
    match url.split_once('#') {
        Some((_, fragment)) if !fragment.trim().is_empty() => decode_token(fragment).map(Some),
        _ => Ok(None),
    }
}
