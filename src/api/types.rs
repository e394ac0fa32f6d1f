//! API request and response types

use crate::engine::{Guidance, ResponseMode, StatsSnapshot};
use crate::session::{SessionView, Transcript};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Continue from this transcript instead of the one held server-side
    #[serde(default)]
    pub history: Option<Transcript>,
}

/// Transcript and counters for one session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub transcript: Transcript,
    pub stats: StatsSnapshot,
    pub stats_summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_guidance: Option<Guidance>,
}

impl SessionResponse {
    pub fn new(session_id: Uuid, view: SessionView) -> Self {
        Self {
            session_id,
            transcript: view.transcript,
            stats: view.stats,
            stats_summary: view.stats_summary,
            last_guidance: view.last_guidance,
        }
    }
}

/// Community-wide counters
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub mode: ResponseMode,
    pub active_sessions: usize,
    pub community: StatsSnapshot,
    pub stats_summary: String,
}

/// Example prompts for the input shortcuts
#[derive(Debug, Serialize)]
pub struct ExamplesResponse {
    pub examples: &'static [&'static str],
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
