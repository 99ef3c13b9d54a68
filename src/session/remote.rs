//! Blocking HTTP client for the session REST API.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Serialize;
use tracing::debug;

use super::{Session, SessionError, SessionStore};
use crate::site::types::SiteConfig;

/// Timeout for the availability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Timeout for regular session requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct CreateSession<'a> {
    name: &'a str,
    config: &'a SiteConfig,
}

/// Sessions held by a remote backend, e.g. `http://localhost:8001/api`.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    base_url: String,
    client: Client,
}

impl RemoteStore {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, SessionError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn sessions_url(&self) -> String {
        format!("{}/sessions", self.base_url)
    }

    fn session_url(&self, id: u64) -> String {
        format!("{}/sessions/{id}", self.base_url)
    }

    /// Probes the backend. Any failure, including a timeout, reads as `false`.
    pub fn is_available(&self) -> bool {
        let up = self
            .client
            .get(self.sessions_url())
            .timeout(PROBE_TIMEOUT)
            .send()
            .is_ok_and(|resp| resp.status().is_success());
        debug!(url = %self.base_url, up, "probed session backend");
        up
    }
}

impl SessionStore for RemoteStore {
    fn save(&mut self, name: &str, config: SiteConfig) -> Result<Session, SessionError> {
        if name.trim().is_empty() {
            return Err(SessionError::InvalidName);
        }
        let body = CreateSession {
            name,
            config: &config,
        };
        let session = self
            .client
            .post(self.sessions_url())
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(session)
    }

    fn list(&self) -> Result<Vec<Session>, SessionError> {
        let sessions = self
            .client
            .get(self.sessions_url())
            .send()?
            .error_for_status()?
            .json()?;
        Ok(sessions)
    }

    fn get(&self, id: u64) -> Result<Session, SessionError> {
        let resp = self.client.get(self.session_url(id)).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(SessionError::NotFound(id));
        }
        Ok(resp.error_for_status()?.json()?)
    }

    fn delete(&mut self, id: u64) -> Result<(), SessionError> {
        let resp = self.client.delete(self.session_url(id)).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(SessionError::NotFound(id));
        }
        resp.error_for_status()?;
        Ok(())
    }
}
