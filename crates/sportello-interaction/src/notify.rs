//! Best-effort notification sink.
//!
//! Events are fire-and-forget: the engine dispatches them on a separate task,
//! failures are logged and swallowed, and the turn's response is never
//! delayed or failed by a sink.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sportello_core::{Sector, TurnRecord};

/// Operational events raised by the escalation/emergency triggers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// Critical urgency or explicit emergency intent was detected.
    EmergencyRaised {
        session_id: String,
        score: u32,
        sector: Sector,
        raised_at: String,
    },
    /// The user asked for a human operator; carries recent turns for review.
    HandoffRequested {
        session_id: String,
        summary: Vec<TurnRecord>,
        raised_at: String,
    },
}

impl NotificationEvent {
    pub fn emergency_raised(session_id: impl Into<String>, score: u32, sector: Sector) -> Self {
        Self::EmergencyRaised {
            session_id: session_id.into(),
            score,
            sector,
            raised_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn handoff_requested(session_id: impl Into<String>, summary: Vec<TurnRecord>) -> Self {
        Self::HandoffRequested {
            session_id: session_id.into(),
            summary,
            raised_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Destination for operational events (ops channel, pager, log).
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers one event. Errors are reported as strings; the engine logs
    /// them and moves on.
    async fn notify(&self, event: NotificationEvent) -> Result<(), String>;
}

/// Default sink that only writes the event to the tracing log.
pub struct TracingSink;

#[async_trait]
impl NotificationSink for TracingSink {
    async fn notify(&self, event: NotificationEvent) -> Result<(), String> {
        match &event {
            NotificationEvent::EmergencyRaised {
                session_id,
                score,
                sector,
                ..
            } => {
                tracing::info!(%session_id, score, %sector, "emergency raised");
            }
            NotificationEvent::HandoffRequested {
                session_id,
                summary,
                ..
            } => {
                tracing::info!(
                    %session_id,
                    turns = summary.len(),
                    "handoff to human operator requested"
                );
            }
        }
        Ok(())
    }
}
