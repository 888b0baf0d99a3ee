//! Client-held identity token and its persistence across runs.
//!
//! A session is valid when its record decodes, has not passed its storage
//! expiry, and carries a non-empty token. The token itself is opaque: its
//! signature and server-side expiry are never checked here, so a stale token
//! is only discovered when the backend refuses it.

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::Result;

/// Fixed lifetime of a stored session, counted from when it was written.
pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Session {
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    session: Session,
    expires_at: DateTime<Utc>,
}

/// Reads and writes the single session record.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Store `session`, replacing any previous one, for [`SESSION_TTL_DAYS`].
    pub fn set_session(&self, session: &Session) -> Result<()> {
        self.set_session_at(session, Utc::now())
    }

    /// The stored session if it is present, parseable, unexpired and has a
    /// token. Every other outcome, including storage errors, reads as `None`.
    pub fn get_session(&self) -> Option<Session> {
        self.get_session_at(Utc::now())
    }

    /// Remove the stored session. Calling it with nothing stored is a no-op.
    pub fn clear_session(&self) -> Result<()> {
        self.storage.remove()?;
        debug!("Session cleared");
        Ok(())
    }

    fn set_session_at(&self, session: &Session, now: DateTime<Utc>) -> Result<()> {
        let record = StoredSession {
            session: session.clone(),
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        };
        let encoded = serde_json::to_string(&record).map_err(std::io::Error::from)?;
        self.storage.save(&encoded)?;
        debug!(user = %session.email, expires_at = %record.expires_at, "Session stored");
        Ok(())
    }

    fn get_session_at(&self, now: DateTime<Utc>) -> Option<Session> {
        let raw = match self.storage.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read session storage, treating as signed out");
                return None;
            }
        };

        let record: StoredSession = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Stored session is corrupt, treating as signed out");
                return None;
            }
        };

        if now >= record.expires_at {
            debug!(expires_at = %record.expires_at, "Stored session has expired");
            return None;
        }

        if !record.session.has_token() {
            debug!("Stored session has no token");
            return None;
        }

        Some(record.session)
    }
}
