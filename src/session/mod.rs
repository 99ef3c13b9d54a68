//! Saved site sessions and the stores that hold them.
//!
//! Every store lists sessions newest first and assigns ids as one past the
//! largest existing id, starting at 1.

mod file;
mod memory;
#[cfg(feature = "remote")]
mod remote;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::site::types::SiteConfig;

pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(feature = "remote")]
pub use remote::RemoteStore;

/// A named, timestamped site configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: u64,
    pub name: String,
    pub config: SiteConfig,
    /// Creation time. Backends may omit it or send an empty string.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Parses RFC 3339 timestamps, and offset-less ones as UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc())
        })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_timestamp(raw).map(Some).map_err(serde::de::Error::custom),
    }
}

/// Errors raised by session stores.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session name must not be blank")]
    InvalidName,
    #[error("session {0} not found")]
    NotFound(u64),
    #[error("session store {operation} failed on '{path}': {source}")]
    Io {
        operation: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("session data is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
    #[cfg(feature = "remote")]
    #[error("session backend request failed: {0}")]
    Remote(#[from] reqwest::Error),
}

/// Storage backend for sessions.
pub trait SessionStore {
    /// Saves `config` under `name` and returns the stored session.
    fn save(&mut self, name: &str, config: SiteConfig) -> Result<Session, SessionError>;

    /// Lists all sessions, newest first.
    fn list(&self) -> Result<Vec<Session>, SessionError>;

    /// Fetches one session by id.
    fn get(&self, id: u64) -> Result<Session, SessionError>;

    /// Removes one session by id.
    fn delete(&mut self, id: u64) -> Result<(), SessionError>;
}

/// Builds the next session for a list of existing ones.
fn next_session(
    existing: &[Session],
    name: &str,
    config: SiteConfig,
) -> Result<Session, SessionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SessionError::InvalidName);
    }
    let id = existing.iter().map(|s| s.id).max().map_or(1, |max| max + 1);
    Ok(Session {
        id,
        name: name.to_string(),
        config,
        created_at: Some(Utc::now()),
    })
}
