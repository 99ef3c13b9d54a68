//! In-memory session store.

use super::{Session, SessionError, SessionStore, next_session};
use crate::site::types::SiteConfig;

/// Process-local session store backing the REST API.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: Vec<Session>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn save(&mut self, name: &str, config: SiteConfig) -> Result<Session, SessionError> {
        let session = next_session(&self.sessions, name, config)?;
        self.sessions.insert(0, session.clone());
        Ok(session)
    }

    fn list(&self) -> Result<Vec<Session>, SessionError> {
        Ok(self.sessions.clone())
    }

    fn get(&self, id: u64) -> Result<Session, SessionError> {
        self.sessions
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }

    fn delete(&mut self, id: u64) -> Result<(), SessionError> {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return Err(SessionError::NotFound(id));
        }
        Ok(())
    }
}
