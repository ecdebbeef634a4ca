//! Response decision types.
//!
//! The action is a closed enum rather than a bag of optional flags so that
//! every consumer has to handle all four routing outcomes explicitly.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// The action chosen for one turn. First matching selector rule wins; there
/// is no fallthrough between actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResponseAction {
    /// The remote capability produced the response text.
    UseRemoteAi,
    /// Canned text selected by intent (capability skipped or failed).
    UseFallbackText,
    /// Emergency path: surface the support phone number immediately.
    TriggerEmergency,
    /// Hand the conversation off to a human operator.
    TriggerEscalation,
}

/// UI hints attached to a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResponseFlags {
    /// Render the support phone number prominently.
    pub show_phone_number: bool,
    /// Render the contact-channel buttons (phone, email).
    pub show_escalation_options: bool,
    /// The response text came from the remote capability.
    pub ai_powered: bool,
}

/// The outcome of one selector run: action, final text, UI flags.
///
/// Computed once per turn, immutable, consumed by the caller and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDecision {
    pub action: ResponseAction,
    pub text: String,
    pub flags: ResponseFlags,
}

impl ResponseDecision {
    pub fn new(action: ResponseAction, text: impl Into<String>) -> Self {
        Self {
            action,
            text: text.into(),
            flags: ResponseFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: ResponseFlags) -> Self {
        self.flags = flags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serializes_snake_case() {
        let json = serde_json::to_string(&ResponseAction::UseRemoteAi).unwrap();
        assert_eq!(json, "\"use_remote_ai\"");
        assert_eq!(ResponseAction::TriggerEmergency.to_string(), "trigger_emergency");
    }

    #[test]
    fn test_decision_defaults() {
        let decision = ResponseDecision::new(ResponseAction::UseFallbackText, "ciao");
        assert!(!decision.flags.show_phone_number);
        assert!(!decision.flags.ai_powered);
    }
}
