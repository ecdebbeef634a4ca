//! The HTTP contract of the contact endpoint.

use crate::validation::ValidationIssue;
use serde::{Deserialize, Serialize};

/// Every way a submission can end, with its HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Accepted and forwarded.
    Accepted,
    /// One or more validation rules failed.
    Invalid(Vec<ValidationIssue>),
    /// The caller exhausted its quota for the window.
    RateLimited,
    /// The downstream mailer/database failed.
    UpstreamFailure(String),
}

impl FormOutcome {
    pub fn status_code(&self) -> u16 {
        match self {
            FormOutcome::Accepted => 200,
            FormOutcome::Invalid(_) => 400,
            FormOutcome::RateLimited => 429,
            FormOutcome::UpstreamFailure(_) => 500,
        }
    }

    /// The JSON body returned to the browser.
    pub fn body(&self) -> FormResponse {
        match self {
            FormOutcome::Accepted => FormResponse {
                success: true,
                message: Some(
                    "Richiesta inviata con successo. Ti ricontatteremo al più presto.".to_string(),
                ),
                error: None,
            },
            FormOutcome::Invalid(issues) => FormResponse {
                success: false,
                message: None,
                error: Some(
                    issues
                        .iter()
                        .map(|issue| issue.to_string())
                        .collect::<Vec<_>>()
                        .join("; "),
                ),
            },
            FormOutcome::RateLimited => FormResponse {
                success: false,
                message: None,
                error: Some("Troppe richieste. Riprova più tardi.".to_string()),
            },
            FormOutcome::UpstreamFailure(_) => FormResponse {
                success: false,
                message: None,
                // Internal details stay in the logs, not in the body.
                error: Some("Errore interno. Riprova più tardi o chiamaci.".to_string()),
            },
        }
    }
}

/// JSON body: `{success, message | error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
