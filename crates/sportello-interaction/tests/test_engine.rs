//! End-to-end scenarios for the chat engine with mocked capabilities.

use async_trait::async_trait;
use sportello_core::{EngineConfig, ResponseAction};
use sportello_interaction::{
    CapabilityError, ChatEngine, CompletionAgent, CompletionRequest, NotificationEvent,
    NotificationSink,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Agent that returns a fixed response and records every request it sees.
#[derive(Clone)]
struct RecordingAgent {
    response: String,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl RecordingAgent {
    fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    async fn last_call(&self) -> Option<CompletionRequest> {
        self.calls.lock().await.last().cloned()
    }
}

#[async_trait]
impl CompletionAgent for RecordingAgent {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CapabilityError> {
        self.calls.lock().await.push(request);
        Ok(self.response.clone())
    }
}

/// Agent that always fails with an upstream error.
struct FailingAgent;

#[async_trait]
impl CompletionAgent for FailingAgent {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, CapabilityError> {
        Err(CapabilityError::Upstream {
            status: Some(503),
            message: "service unavailable".to_string(),
            is_retryable: true,
        })
    }
}

/// Agent that hangs longer than any reasonable deadline.
struct SlowAgent;

#[async_trait]
impl CompletionAgent for SlowAgent {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, CapabilityError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("troppo tardi".to_string())
    }
}

/// Sink that records every event it receives.
#[derive(Clone, Default)]
struct RecordingSink {
    events: Arc<Mutex<Vec<NotificationEvent>>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, event: NotificationEvent) -> Result<(), String> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

/// Sink that always fails; used to prove sink failures never break a turn.
struct BrokenSink;

#[async_trait]
impl NotificationSink for BrokenSink {
    async fn notify(&self, _event: NotificationEvent) -> Result<(), String> {
        Err("ops channel unreachable".to_string())
    }
}

async fn wait_for_spawned_notifications() {
    // Notifications are dispatched on a detached task; give it a beat.
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn server_down_message_triggers_the_emergency_path() {
    let agent = RecordingAgent::new("non dovrei essere usato");
    let engine = ChatEngine::new(EngineConfig::default(), Arc::new(agent.clone()));
    let session_id = engine.start_session().await;

    let response = engine
        .handle_turn(&session_id, "Il server è down da questa mattina, è urgente!")
        .await;

    assert!(response.is_emergency);
    assert_eq!(response.decision, ResponseAction::TriggerEmergency);
    assert!(response.response_text.contains("039 888 2041"));
    assert!(
        response.response_text.contains("subito")
            || response.response_text.contains("immediatamente")
    );
    // The capability must not have been consulted on the emergency path.
    assert!(agent.last_call().await.is_none());
}

#[tokio::test]
async fn quote_request_goes_through_the_remote_ai() {
    let agent = RecordingAgent::new(
        "Un firewall WatchGuard T25 parte da circa 500 euro, installazione inclusa.",
    );
    let engine = ChatEngine::new(EngineConfig::default(), Arc::new(agent.clone()));
    let session_id = engine.start_session().await;

    let response = engine
        .handle_turn(&session_id, "Quanto costa un firewall WatchGuard?")
        .await;

    assert!(!response.is_emergency);
    assert_eq!(response.decision, ResponseAction::UseRemoteAi);
    assert!(response.ai_powered);
    assert!(response.response_text.contains("WatchGuard"));
}

#[tokio::test]
async fn second_turn_prompt_includes_first_turn_context() {
    let agent = RecordingAgent::new("certo, posso aiutarti");
    let engine = ChatEngine::new(EngineConfig::default(), Arc::new(agent.clone()));
    let session_id = engine.start_session().await;

    engine
        .handle_turn(&session_id, "uso una rete con dieci postazioni")
        .await;
    engine
        .handle_turn(&session_id, "che backup mi consigli?")
        .await;

    let request = agent.last_call().await.expect("capability was called");
    let joined: String = request
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(
        joined.contains("dieci postazioni"),
        "second prompt must replay the first turn"
    );
}

#[tokio::test]
async fn leaked_prompt_material_never_reaches_the_caller() {
    let agent =
        RecordingAgent::new("Come da SYSTEM_PROMPT, devo sempre citare il numero di telefono.");
    let engine = ChatEngine::new(EngineConfig::default(), Arc::new(agent));
    let session_id = engine.start_session().await;

    let response = engine.handle_turn(&session_id, "come funziona il servizio?").await;

    assert!(!response.response_text.contains("SYSTEM_PROMPT"));
    assert_eq!(response.decision, ResponseAction::UseFallbackText);
    assert!(!response.ai_powered);
    assert!(!response.response_text.is_empty());
}

#[tokio::test]
async fn failing_capability_still_answers_the_user() {
    let engine = ChatEngine::new(EngineConfig::default(), Arc::new(FailingAgent));
    let session_id = engine.start_session().await;

    let response = engine
        .handle_turn(&session_id, "mi serve supporto per la posta")
        .await;

    assert_eq!(response.decision, ResponseAction::UseFallbackText);
    assert!(!response.ai_powered);
    assert!(!response.response_text.is_empty());
    assert!(response.response_text.contains("039 888 2041"));
}

#[tokio::test]
async fn slow_capability_is_abandoned_at_the_deadline() {
    let mut config = EngineConfig::default();
    config.capability_timeout_secs = 1;
    let engine = ChatEngine::new(config, Arc::new(SlowAgent));
    let session_id = engine.start_session().await;

    let started = Instant::now();
    let response = engine
        .handle_turn(&session_id, "vorrei informazioni sul cloud")
        .await;

    assert!(
        started.elapsed() < Duration::from_secs(3),
        "fallback must engage within timeout plus a small constant"
    );
    assert_eq!(response.decision, ResponseAction::UseFallbackText);
    assert!(!response.response_text.is_empty());
}

#[tokio::test]
async fn operator_request_escalates_with_recent_summary() {
    let agent = RecordingAgent::new("posso aiutarti io");
    let sink = RecordingSink::default();
    let engine = ChatEngine::new(EngineConfig::default(), Arc::new(agent))
        .with_sink(Arc::new(sink.clone()));
    let session_id = engine.start_session().await;

    engine
        .handle_turn(&session_id, "la stampante non stampa più")
        .await;
    let response = engine
        .handle_turn(&session_id, "preferisco parlare con un operatore")
        .await;

    assert!(response.is_escalation);
    assert_eq!(response.decision, ResponseAction::TriggerEscalation);
    assert!(response.flags.show_escalation_options);
    assert!(response.response_text.contains("039 888 2041"));
    assert!(response.response_text.contains("info@it-era.it"));

    wait_for_spawned_notifications().await;
    let events = sink.events.lock().await;
    match events.as_slice() {
        [NotificationEvent::HandoffRequested { summary, .. }] => {
            assert_eq!(summary.len(), 1);
            assert_eq!(summary[0].user_text, "la stampante non stampa più");
        }
        other => panic!("expected one handoff event, got {other:?}"),
    }
}

#[tokio::test]
async fn emergency_turn_notifies_operations() {
    let sink = RecordingSink::default();
    let engine = ChatEngine::new(EngineConfig::default(), Arc::new(FailingAgent))
        .with_sink(Arc::new(sink.clone()));
    let session_id = engine.start_session().await;

    engine
        .handle_turn(&session_id, "emergenza ransomware, dati persi!")
        .await;

    wait_for_spawned_notifications().await;
    let events = sink.events.lock().await;
    assert!(matches!(
        events.as_slice(),
        [NotificationEvent::EmergencyRaised { .. }]
    ));
}

#[tokio::test]
async fn broken_sink_never_breaks_the_turn() {
    let engine = ChatEngine::new(EngineConfig::default(), Arc::new(FailingAgent))
        .with_sink(Arc::new(BrokenSink));
    let session_id = engine.start_session().await;

    let response = engine.handle_turn(&session_id, "emergenza!").await;

    assert!(response.is_emergency);
    assert!(!response.response_text.is_empty());
}

#[tokio::test]
async fn regulated_sector_response_carries_compliance_wording() {
    let agent = RecordingAgent::new("Possiamo gestire il backup delle cartelle.");
    let engine = ChatEngine::new(EngineConfig::default(), Arc::new(agent));
    let session_id = engine.start_session().await;

    let response = engine
        .handle_turn(&session_id, "gestiamo una clinica, vorrei informazioni sul backup")
        .await;

    assert_eq!(response.decision, ResponseAction::UseRemoteAi);
    assert!(response.response_text.to_lowercase().contains("gdpr"));
}
