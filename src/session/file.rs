//! Local JSON file store, the fallback when no session backend is reachable.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Session, SessionError, SessionStore, next_session};
use crate::site::types::SiteConfig;

/// Keeps every session in one JSON array on disk.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the
/// original, so a crash mid-write never leaves a truncated store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Opens a store at `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, operation: &'static str, source: io::Error) -> SessionError {
        SessionError::Io {
            operation,
            path: self.path.display().to_string(),
            source,
        }
    }

    fn load(&self) -> Result<Vec<Session>, SessionError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error("read", e)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn store(&self, sessions: &[Session]) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(sessions)?;
        let tmp_path = self.path.with_extension("json.tmp");

        let mut tmp = File::create(&tmp_path).map_err(|e| self.io_error("create temp file", e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| self.io_error("write temp file", e))?;
        tmp.sync_all()
            .map_err(|e| self.io_error("sync temp file", e))?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            self.io_error("rename", e)
        })?;
        debug!(path = %self.path.display(), count = sessions.len(), "wrote session store");
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn save(&mut self, name: &str, config: SiteConfig) -> Result<Session, SessionError> {
        let mut sessions = self.load()?;
        let session = next_session(&sessions, name, config)?;
        sessions.insert(0, session.clone());
        self.store(&sessions)?;
        Ok(session)
    }

    fn list(&self) -> Result<Vec<Session>, SessionError> {
        self.load()
    }

    fn get(&self, id: u64) -> Result<Session, SessionError> {
        self.load()?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or(SessionError::NotFound(id))
    }

    fn delete(&mut self, id: u64) -> Result<(), SessionError> {
        let mut sessions = self.load()?;
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            return Err(SessionError::NotFound(id));
        }
        self.store(&sessions)
    }
}
