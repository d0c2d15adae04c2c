//! Per-session conversation context and the store that holds it.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use paraiso_core::types::FaqRecord;

use crate::error::ChatError;

/// What a session is currently browsing.
///
/// `items` is always the dataset filtered by `intent`, in dataset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub intent: String,
    pub items: Vec<FaqRecord>,
    /// Unix seconds of the last message that touched this context.
    pub last_active_at: i64,
}

impl SessionContext {
    pub fn new(intent: impl Into<String>, items: Vec<FaqRecord>) -> Self {
        Self {
            intent: intent.into(),
            items,
            last_active_at: Utc::now().timestamp(),
        }
    }
}

/// Storage for session contexts keyed by the client-supplied session id.
///
/// Absence of a context means the session sits at the main menu.
pub trait SessionStore: Send + Sync {
    fn get(&self, session_id: &str) -> Result<Option<SessionContext>, ChatError>;
    fn put(&self, session_id: &str, context: SessionContext) -> Result<(), ChatError>;
    fn delete(&self, session_id: &str) -> Result<(), ChatError>;
    /// Number of live contexts. Idle ones awaiting a purge are not counted.
    fn count(&self) -> Result<usize, ChatError>;
    /// Drop idle contexts. Returns how many were removed.
    fn purge_expired(&self) -> Result<usize, ChatError>;
}

/// Process-local session store backed by a `HashMap`.
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, SessionContext>>,
    idle_timeout_secs: Option<i64>,
}

impl InMemorySessionStore {
    /// Store whose contexts live until deleted or the process exits.
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout_secs: None,
        }
    }

    /// Store that forgets contexts idle for longer than `minutes`.
    /// Zero disables expiry.
    pub fn with_idle_timeout(minutes: u32) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout_secs: (minutes > 0).then(|| i64::from(minutes) * 60),
        }
    }

    fn is_expired(&self, context: &SessionContext, now: i64) -> bool {
        match self.idle_timeout_secs {
            Some(timeout) => now - context.last_active_at > timeout,
            None => false,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, SessionContext>>, ChatError> {
        self.sessions
            .lock()
            .map_err(|e| ChatError::StorageError(format!("session lock poisoned: {}", e)))
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, session_id: &str) -> Result<Option<SessionContext>, ChatError> {
        let mut sessions = self.lock()?;
        let now = Utc::now().timestamp();
        let expired = match sessions.get(session_id) {
            Some(context) => self.is_expired(context, now),
            None => return Ok(None),
        };
        if expired {
            sessions.remove(session_id);
            tracing::debug!(session = %session_id, "Session expired");
            return Ok(None);
        }
        Ok(sessions.get(session_id).cloned())
    }

    fn put(&self, session_id: &str, context: SessionContext) -> Result<(), ChatError> {
        self.lock()?.insert(session_id.to_string(), context);
        Ok(())
    }

    fn delete(&self, session_id: &str) -> Result<(), ChatError> {
        self.lock()?.remove(session_id);
        Ok(())
    }

    fn count(&self) -> Result<usize, ChatError> {
        let now = Utc::now().timestamp();
        Ok(self
            .lock()?
            .values()
            .filter(|context| !self.is_expired(context, now))
            .count())
    }

    fn purge_expired(&self) -> Result<usize, ChatError> {
        let mut sessions = self.lock()?;
        let now = Utc::now().timestamp();
        let before = sessions.len();
        sessions.retain(|_, context| !self.is_expired(context, now));
        Ok(before - sessions.len())
    }
}
