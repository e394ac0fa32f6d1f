//! HTTP API for the village doctor chat

mod assets;
mod handlers;
mod sessions;
mod types;

pub use handlers::create_router;
pub use sessions::SessionStore;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }
}
