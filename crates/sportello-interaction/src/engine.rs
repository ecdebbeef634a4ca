//! The chat engine: classification, routing, and session bookkeeping.
//!
//! One engine instance is constructed per process and handed to callers by
//! reference; it owns every session's conversation state. Turns for the same
//! session are expected to be serialized by the caller (the UI disables the
//! input box while a response is pending), so no per-session lock is needed
//! beyond the shared map.

use crate::capability::{CompletionAgent, CompletionRequest};
use crate::fallback::fallback_text;
use crate::notify::{NotificationEvent, NotificationSink, TracingSink};
use crate::postprocess::postprocess;
use crate::prompt::build_messages;
use serde::{Deserialize, Serialize};
use sportello_core::{
    ConversationState, EngineConfig, Intent, ResponseAction, ResponseDecision, ResponseFlags,
    SignalSet, TurnRecord, UrgencyLevel, classify,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Wording that means "I want a human", checked verbatim (case-insensitive)
/// against the raw message.
static OPERATOR_TERMS: &[&str] = &[
    "operatore",
    "umano",
    "parlare con qualcuno",
    "parlare con una persona",
    "persona reale",
];

/// What `handle_turn` returns to the caller (UI widget or test harness).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResponse {
    /// Text to show the user. Never empty, never a raw error.
    pub response_text: String,
    /// The routing decision that produced the text.
    pub decision: ResponseAction,
    pub is_emergency: bool,
    pub is_escalation: bool,
    pub ai_powered: bool,
    /// UI hints (phone number banner, escalation buttons).
    pub flags: ResponseFlags,
}

/// Classification and response routing engine.
pub struct ChatEngine {
    config: EngineConfig,
    agent: Arc<dyn CompletionAgent>,
    sink: Arc<dyn NotificationSink>,
    sessions: Arc<RwLock<HashMap<String, ConversationState>>>,
}

impl ChatEngine {
    /// Creates an engine with the default tracing-only notification sink.
    pub fn new(config: EngineConfig, agent: Arc<dyn CompletionAgent>) -> Self {
        Self {
            config,
            agent,
            sink: Arc::new(TracingSink),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Replaces the notification sink.
    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Starts a new session and returns its opaque id.
    pub async fn start_session(&self) -> String {
        let session_id = uuid::Uuid::new_v4().to_string();
        self.sessions.write().await.insert(
            session_id.clone(),
            ConversationState::new(self.config.history_cap),
        );
        tracing::debug!(%session_id, "session started");
        session_id
    }

    /// Number of turns currently stored for a session (0 if unknown).
    pub async fn session_len(&self, session_id: &str) -> usize {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(|state| state.len())
            .unwrap_or(0)
    }

    /// Processes one user turn start-to-finish and returns the response.
    ///
    /// The user always receives some response text within the capability
    /// timeout plus a small constant; upstream failures are recovered by the
    /// fallback path and never surface here.
    pub async fn handle_turn(&self, session_id: &str, text: &str) -> TurnResponse {
        let signals = classify(text, &self.config.urgency);
        tracing::debug!(
            %session_id,
            urgency = %signals.urgency.level,
            intent = %signals.intent,
            sector = %signals.sector.sector,
            "turn classified"
        );

        let decision = self.decide(session_id, text, &signals).await;

        let record = TurnRecord::new(text, decision.text.clone(), signals);
        let mut sessions = self.sessions.write().await;
        let state = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| ConversationState::new(self.config.history_cap));
        state.append(record);
        drop(sessions);

        TurnResponse {
            is_emergency: decision.action == ResponseAction::TriggerEmergency,
            is_escalation: decision.action == ResponseAction::TriggerEscalation,
            ai_powered: decision.flags.ai_powered,
            response_text: decision.text,
            decision: decision.action,
            flags: decision.flags,
        }
    }

    /// Applies the priority rules: emergency, operator request, remote AI,
    /// canned fallback. First matching rule wins.
    async fn decide(&self, session_id: &str, text: &str, signals: &SignalSet) -> ResponseDecision {
        if signals.intent == Intent::Emergency || signals.urgency.level == UrgencyLevel::Critical {
            self.spawn_notify(NotificationEvent::emergency_raised(
                session_id,
                signals.urgency.score,
                signals.sector.sector,
            ));
            return self.emergency_decision();
        }

        if is_operator_request(text) {
            let summary = self.recent_summary(session_id).await;
            self.spawn_notify(NotificationEvent::handoff_requested(session_id, summary));
            return self.escalation_decision();
        }

        if let Some(text) = self.try_remote_ai(session_id, text, signals).await {
            return ResponseDecision::new(ResponseAction::UseRemoteAi, text).with_flags(
                ResponseFlags {
                    ai_powered: true,
                    ..ResponseFlags::default()
                },
            );
        }

        ResponseDecision::new(
            ResponseAction::UseFallbackText,
            fallback_text(&self.config, signals.intent),
        )
    }

    /// Single capability attempt under a deadline. Returns `None` on any
    /// failure (timeout, upstream error, prompt leak) so the caller falls
    /// back to canned text.
    async fn try_remote_ai(
        &self,
        session_id: &str,
        text: &str,
        signals: &SignalSet,
    ) -> Option<String> {
        let messages = {
            let sessions = self.sessions.read().await;
            build_messages(&self.config, sessions.get(session_id), text, signals)
        };

        let (max_tokens, temperature) = generation_options(signals);
        let request = CompletionRequest {
            messages,
            max_tokens,
            temperature,
            sector_hint: Some(signals.sector.sector.to_string()),
        };

        let deadline = Duration::from_secs(self.config.capability_timeout_secs);
        match tokio::time::timeout(deadline, self.agent.complete(request)).await {
            Ok(Ok(output)) => match postprocess(&self.config, signals, output) {
                Some(clean) => Some(clean),
                None => {
                    tracing::warn!(%session_id, "capability output leaked prompt material, discarded");
                    None
                }
            },
            Ok(Err(err)) => {
                tracing::warn!(%session_id, error = %err, "capability call failed, using fallback");
                None
            }
            Err(_) => {
                tracing::warn!(
                    %session_id,
                    timeout_secs = self.config.capability_timeout_secs,
                    "capability call timed out, using fallback"
                );
                None
            }
        }
    }

    fn emergency_decision(&self) -> ResponseDecision {
        let contact = &self.config.contact;
        let text = format!(
            "🚨 EMERGENZA RILEVATA\n\nChiama subito {} al {}: {}.\n\nUn tecnico prende in carico la tua richiesta immediatamente.",
            contact.company_name, contact.phone, contact.response_promise
        );
        ResponseDecision::new(ResponseAction::TriggerEmergency, text).with_flags(ResponseFlags {
            show_phone_number: true,
            ..ResponseFlags::default()
        })
    }

    fn escalation_decision(&self) -> ResponseDecision {
        let contact = &self.config.contact;
        let text = format!(
            "Certo, ti metto in contatto con un nostro operatore.\n\n📞 Telefono: {}\n✉️ Email: {}\n\nUn tecnico ti risponde al più presto.",
            contact.phone, contact.email
        );
        ResponseDecision::new(ResponseAction::TriggerEscalation, text).with_flags(ResponseFlags {
            show_escalation_options: true,
            ..ResponseFlags::default()
        })
    }

    /// Recent turns handed to a human operator on escalation.
    async fn recent_summary(&self, session_id: &str) -> Vec<TurnRecord> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .map(|state| {
                state
                    .recent_context(self.config.context_turns)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Fire-and-forget dispatch; sink failures are logged, never propagated.
    fn spawn_notify(&self, event: NotificationEvent) {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(err) = sink.notify(event).await {
                tracing::warn!(error = %err, "notification sink failed");
            }
        });
    }
}

/// Detects an explicit request for a human operator.
fn is_operator_request(text: &str) -> bool {
    let lowered = text.to_lowercase();
    OPERATOR_TERMS.iter().any(|t| lowered.contains(*t))
}

/// Generation options tuned by the signals, mirroring how the heuristics
/// were originally calibrated: urgent turns get shorter, more focused
/// output; negative sentiment gets a slightly warmer temperature.
fn generation_options(signals: &SignalSet) -> (u32, f32) {
    let mut max_tokens = 250;
    let mut temperature = 0.7;

    match signals.urgency.level {
        UrgencyLevel::Critical => {
            max_tokens = 150;
            temperature = 0.5;
        }
        UrgencyLevel::High => {
            max_tokens = 200;
            temperature = 0.6;
        }
        UrgencyLevel::Moderate | UrgencyLevel::None => {}
    }

    if signals.sentiment.sentiment == sportello_core::Sentiment::Negative {
        temperature = 0.8;
    }

    (max_tokens, temperature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityError;
    use async_trait::async_trait;

    struct StaticAgent {
        response: String,
    }

    #[async_trait]
    impl CompletionAgent for StaticAgent {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, CapabilityError> {
            Ok(self.response.clone())
        }
    }

    struct FailingAgent;

    #[async_trait]
    impl CompletionAgent for FailingAgent {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, CapabilityError> {
            Err(CapabilityError::Upstream {
                status: Some(500),
                message: "boom".to_string(),
                is_retryable: true,
            })
        }
    }

    fn engine_with(agent: Arc<dyn CompletionAgent>) -> ChatEngine {
        ChatEngine::new(EngineConfig::default(), agent)
    }

    #[test]
    fn test_operator_request_detection() {
        assert!(is_operator_request("vorrei parlare con un operatore"));
        assert!(is_operator_request("posso parlare con qualcuno?"));
        assert!(is_operator_request("C'è un UMANO?"));
        assert!(!is_operator_request("il pc è lento"));
    }

    #[test]
    fn test_generation_options_by_urgency() {
        let mut signals = SignalSet::default();
        assert_eq!(generation_options(&signals), (250, 0.7));

        signals.urgency.level = UrgencyLevel::High;
        assert_eq!(generation_options(&signals), (200, 0.6));

        signals.urgency.level = UrgencyLevel::Critical;
        assert_eq!(generation_options(&signals), (150, 0.5));
    }

    #[tokio::test]
    async fn test_emergency_turn_short_circuits_the_capability() {
        let engine = engine_with(Arc::new(FailingAgent));
        let session_id = engine.start_session().await;

        let response = engine.handle_turn(&session_id, "emergenza! è tutto bloccato").await;

        assert!(response.is_emergency);
        assert_eq!(response.decision, ResponseAction::TriggerEmergency);
        assert!(response.flags.show_phone_number);
        assert!(response.response_text.contains("039 888 2041"));
        assert!(!response.ai_powered);
    }

    #[tokio::test]
    async fn test_failed_capability_falls_back_to_canned_text() {
        let engine = engine_with(Arc::new(FailingAgent));
        let session_id = engine.start_session().await;

        let response = engine.handle_turn(&session_id, "vorrei un preventivo").await;

        assert_eq!(response.decision, ResponseAction::UseFallbackText);
        assert!(!response.ai_powered);
        assert!(!response.response_text.is_empty());
    }

    #[tokio::test]
    async fn test_turns_accumulate_in_session_history() {
        let engine = engine_with(Arc::new(StaticAgent {
            response: "va bene".to_string(),
        }));
        let session_id = engine.start_session().await;

        engine.handle_turn(&session_id, "prima domanda").await;
        engine.handle_turn(&session_id, "seconda domanda").await;

        assert_eq!(engine.session_len(&session_id).await, 2);
    }

    #[tokio::test]
    async fn test_unknown_session_is_created_on_first_turn() {
        let engine = engine_with(Arc::new(StaticAgent {
            response: "ok".to_string(),
        }));

        let response = engine.handle_turn("mai-vista", "ciao").await;
        assert!(!response.response_text.is_empty());
        assert_eq!(engine.session_len("mai-vista").await, 1);
    }
}
