use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::contract::model::SessionIdentity;

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    id: String,
    email: String,
    role: String,
    name: String,
}

impl From<&SessionIdentity> for StoredSession {
    fn from(s: &SessionIdentity) -> Self {
        Self {
            id: s.id.clone(),
            email: s.email.clone(),
            role: s.role.clone(),
            name: s.name.clone(),
        }
    }
}

impl From<StoredSession> for SessionIdentity {
    fn from(s: StoredSession) -> Self {
        Self {
            id: s.id,
            email: s.email,
            role: s.role,
            name: s.name,
        }
    }
}

/// Single session-identity record kept as JSON in one file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the stored identity. A missing file means nobody is signed in.
    pub fn load(&self) -> Result<Option<SessionIdentity>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read session file {}", self.path.display()))
            }
        };
        let stored: StoredSession = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed session file {}", self.path.display()))?;
        debug!(path = %self.path.display(), "session loaded");
        Ok(Some(stored.into()))
    }

    pub fn save(&self, identity: &SessionIdentity) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(&StoredSession::from(identity))
            .context("Failed to serialize session")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;
        info!(user_id = %identity.id, "session saved");
        Ok(())
    }

    /// Remove the stored identity. Clearing an absent session is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove session file {}", self.path.display())),
        }
    }
}
