//! Chat session: transcript plus per-session consultation counters
//!
//! `clear` is a true reset. It empties the transcript and zeroes this
//! session's counters, so the displayed summary always matches the counters
//! behind it. Community totals live in the engine and are not affected.

use crate::engine::{ConsultationStats, Guidance, ResponseEngine, StatsSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

pub type Transcript = Vec<Turn>;

/// What the chat widget renders after an action
#[derive(Debug, Clone)]
pub struct SessionView {
    pub transcript: Transcript,
    pub stats: StatsSnapshot,
    pub stats_summary: String,
    pub last_guidance: Option<Guidance>,
}

pub struct ChatSession {
    id: Uuid,
    engine: Arc<ResponseEngine>,
    transcript: Transcript,
    stats: ConsultationStats,
}

impl ChatSession {
    pub fn new(engine: Arc<ResponseEngine>) -> Self {
        Self {
            id: Uuid::new_v4(),
            engine,
            transcript: Vec::new(),
            stats: ConsultationStats::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Append the user's message and the engine's answer.
    pub async fn submit(&mut self, text: &str) -> SessionView {
        self.transcript.push(Turn::user(text));

        let guidance = self.engine.generate_response(text, &self.stats).await;
        self.transcript.push(Turn::assistant(guidance.text.clone()));

        tracing::debug!(
            session = %self.id,
            turns = self.transcript.len(),
            source = ?guidance.source,
            "Message answered"
        );

        self.view_with(Some(guidance))
    }

    /// Same as [`submit`](Self::submit), but continues from a transcript
    /// supplied by the caller instead of the held one.
    pub async fn submit_with_history(&mut self, text: &str, history: Transcript) -> SessionView {
        self.transcript = history;
        self.submit(text).await
    }

    pub fn clear(&mut self) -> SessionView {
        self.transcript.clear();
        self.stats.reset();
        tracing::debug!(session = %self.id, "Session cleared");
        self.view()
    }

    pub fn view(&self) -> SessionView {
        self.view_with(None)
    }

    fn view_with(&self, last_guidance: Option<Guidance>) -> SessionView {
        let stats = self.stats.snapshot();
        SessionView {
            transcript: self.transcript.clone(),
            stats_summary: stats.summary(),
            stats,
            last_guidance,
        }
    }
}
