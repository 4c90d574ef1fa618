//! Registry of isolated sessions
//!
//! Hosts that serve more than one conversation keep each one behind its own
//! async mutex. Holding that mutex across the completion call is what keeps
//! at most one request in flight per session; different sessions never
//! share record, transcript or reply state.

use crate::error::{Result, ReqCollectorError};
use crate::providers::Provider;
use crate::session::Session;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Session handle shared between the registry and its callers
pub type SharedSession = Arc<Mutex<Session>>;

/// Identifier of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Maps session ids to independently owned sessions
pub struct SessionRegistry {
    provider: Arc<dyn Provider>,
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
}

impl SessionRegistry {
    /// Create an empty registry whose sessions all use `provider`
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Return the session for `id`, creating it on first use
    ///
    /// Calling this again for the same id returns the existing session
    /// untouched.
    pub async fn initialize(&self, id: SessionId) -> SharedSession {
        if let Some(existing) = self.sessions.read().await.get(&id) {
            return Arc::clone(existing);
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(id).or_insert_with(|| {
            tracing::info!(session = %id, "Starting new session");
            Arc::new(Mutex::new(Session::new(Arc::clone(&self.provider))))
        }))
    }

    /// Allocate a new id and session
    pub async fn create(&self) -> (SessionId, SharedSession) {
        let id = SessionId::new();
        let session = self.initialize(id).await;
        (id, session)
    }

    /// Look up an existing session
    pub async fn get(&self, id: SessionId) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// End a session; its state is dropped, nothing is persisted
    ///
    /// Returns true if the session existed.
    pub async fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(session = %id, "Ended session");
        }
        removed
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true if no session is live
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Submit user text to a session and return the recorded reply
    ///
    /// # Errors
    ///
    /// Returns `Precondition` if the session does not exist
    pub async fn submit(&self, id: SessionId, text: String) -> Result<String> {
        let session = self.require(id).await?;
        let mut session = session.lock().await;
        Ok(session.submit_user_reply(text).await.to_string())
    }

    /// Confirm and export a session's snapshot
    ///
    /// # Errors
    ///
    /// Returns `Precondition` if the session does not exist or has no reply yet
    pub async fn export(&self, id: SessionId) -> Result<String> {
        let session = self.require(id).await?;
        let mut session = session.lock().await;
        session.confirm_and_export()
    }

    async fn require(&self, id: SessionId) -> Result<SharedSession> {
        self.get(id).await.ok_or_else(|| {
            ReqCollectorError::Precondition(format!("unknown session {}", id)).into()
        })
    }
}
