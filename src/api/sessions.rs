//! In-memory store of live chat sessions

use crate::engine::ResponseEngine;
use crate::session::ChatSession;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

pub type SharedSession = Arc<AsyncMutex<ChatSession>>;

struct Entry {
    session: SharedSession,
    last_active: DateTime<Utc>,
}

/// Sessions keyed by id. When full, creating a session evicts the one
/// touched least recently.
pub struct SessionStore {
    engine: Arc<ResponseEngine>,
    sessions: Mutex<HashMap<Uuid, Entry>>,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(engine: Arc<ResponseEngine>, max_sessions: usize) -> Self {
        Self {
            engine,
            sessions: Mutex::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn engine(&self) -> &ResponseEngine {
        &self.engine
    }

    pub fn create(&self) -> (Uuid, SharedSession) {
        let session = ChatSession::new(self.engine.clone());
        let id = session.id();
        let session = Arc::new(AsyncMutex::new(session));

        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_active)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::info!(session = %oldest, "Evicted idle session");
        }
        sessions.insert(
            id,
            Entry {
                session: session.clone(),
                last_active: Utc::now(),
            },
        );
        tracing::info!(session = %id, active = sessions.len(), "Session created");

        (id, session)
    }

    /// Look up a session and mark it active.
    pub fn get(&self, id: Uuid) -> Option<SharedSession> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = sessions.get_mut(&id)?;
        entry.last_active = Utc::now();
        Some(entry.session.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
