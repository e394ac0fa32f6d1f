//! Symptom guidance engine
//!
//! Decides how a symptom description is answered: emergency alert first,
//! then the collaborator when one is configured, then the offline rule
//! table. Collaborator failures never escape; they come back as
//! [`CollaboratorOutcome::Degraded`] and the offline answer is used instead.

mod emergency;
mod rules;
mod stats;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub mod testing;

pub use stats::{ConsultationStats, StatsSnapshot};

use crate::llm::{LlmError, LlmErrorKind, LlmService};
use crate::system_prompt::guidance_request;
use rules::GENERAL_GUIDANCE;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Default deadline for a collaborator answer
pub const DEFAULT_COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(60);

/// Where a piece of guidance came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "condition", rename_all = "snake_case")]
pub enum GuidanceSource {
    Emergency,
    Collaborator,
    Condition(String),
    General,
}

/// Answer to one symptom description
#[derive(Debug, Clone, Serialize)]
pub struct Guidance {
    pub text: String,
    pub source: GuidanceSource,
    /// Set when the collaborator was asked and failed
    pub fallback_reason: Option<LlmErrorKind>,
}

/// Result of asking the collaborator
#[derive(Debug)]
pub enum CollaboratorOutcome {
    Answered(String),
    Degraded(LlmError),
}

/// Whether the collaborator is consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    Collaborator,
    Offline,
}

pub struct ResponseEngine {
    collaborator: Option<Arc<dyn LlmService>>,
    collaborator_timeout: Duration,
    community: Arc<ConsultationStats>,
}

impl ResponseEngine {
    /// Engine that only uses the rule table
    pub fn offline() -> Self {
        Self {
            collaborator: None,
            collaborator_timeout: DEFAULT_COLLABORATOR_TIMEOUT,
            community: Arc::new(ConsultationStats::new()),
        }
    }

    pub fn with_collaborator(collaborator: Arc<dyn LlmService>) -> Self {
        Self {
            collaborator: Some(collaborator),
            ..Self::offline()
        }
    }

    #[must_use]
    pub fn collaborator_timeout(mut self, deadline: Duration) -> Self {
        self.collaborator_timeout = deadline;
        self
    }

    pub fn mode(&self) -> ResponseMode {
        if self.collaborator.is_some() {
            ResponseMode::Collaborator
        } else {
            ResponseMode::Offline
        }
    }

    /// Process-wide totals across every session. Never reset by a session.
    pub fn community_stats(&self) -> &ConsultationStats {
        &self.community
    }

    /// Answer `text`, recording the consultation into `stats` and the
    /// community totals.
    pub async fn generate_response(&self, text: &str, stats: &ConsultationStats) -> Guidance {
        self.record(stats, ConsultationStats::record_consultation);

        let lowered = text.to_lowercase();

        if let Some(keyword) = emergency::detect(&lowered) {
            self.record(stats, ConsultationStats::record_emergency);
            tracing::warn!(keyword, "Emergency keyword detected");
            return Guidance {
                text: emergency::alert(text),
                source: GuidanceSource::Emergency,
                fallback_reason: None,
            };
        }

        let mut fallback_reason = None;

        if let Some(collaborator) = &self.collaborator {
            match self.consult(collaborator.as_ref(), text).await {
                CollaboratorOutcome::Answered(answer) => {
                    return Guidance {
                        text: answer,
                        source: GuidanceSource::Collaborator,
                        fallback_reason: None,
                    };
                }
                CollaboratorOutcome::Degraded(err) => {
                    tracing::warn!(
                        kind = ?err.kind,
                        error = %err.message,
                        "Collaborator unavailable, using offline guidance"
                    );
                    fallback_reason = Some(err.kind);
                }
            }
        }

        let mut guidance = self.offline_guidance(&lowered, stats);
        guidance.fallback_reason = fallback_reason;
        guidance
    }

    /// Ask the collaborator, folding every failure into `Degraded`.
    pub async fn consult(&self, collaborator: &dyn LlmService, text: &str) -> CollaboratorOutcome {
        let request = guidance_request(text);

        match timeout(self.collaborator_timeout, collaborator.complete(&request)).await {
            Ok(Ok(response)) if response.is_blank() => {
                CollaboratorOutcome::Degraded(LlmError::malformed("Empty completion"))
            }
            Ok(Ok(response)) => CollaboratorOutcome::Answered(response.text),
            Ok(Err(err)) => CollaboratorOutcome::Degraded(err),
            Err(_) => CollaboratorOutcome::Degraded(LlmError::timeout(format!(
                "No answer within {}s",
                self.collaborator_timeout.as_secs()
            ))),
        }
    }

    fn offline_guidance(&self, lowered: &str, stats: &ConsultationStats) -> Guidance {
        match rules::find(lowered) {
            Some(rule) => {
                tracing::debug!(condition = rule.name, "Condition rule matched");
                stats.record_condition(rule.name);
                self.community.record_condition(rule.name);
                Guidance {
                    text: rule.render(),
                    source: GuidanceSource::Condition(rule.name.to_string()),
                    fallback_reason: None,
                }
            }
            None => Guidance {
                text: GENERAL_GUIDANCE.to_string(),
                source: GuidanceSource::General,
                fallback_reason: None,
            },
        }
    }

    fn record(&self, stats: &ConsultationStats, op: fn(&ConsultationStats)) {
        op(stats);
        op(&self.community);
    }
}
