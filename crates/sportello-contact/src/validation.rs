//! Contact form submission validation.
//!
//! Field names match the JSON payload the website forms post. All rules are
//! checked and all failures reported together, so the form can highlight
//! every offending field at once.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Italian phone numbers: optional +39/0039 prefix, then 6-11 digits with
/// spaces, dots or dashes as separators.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+39|0039)?[\s.\-]?\d(?:[\s.\-]?\d){5,10}$").expect("valid phone regex")
});

/// One contact form submission as posted by the website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub nome: String,
    pub email: String,
    pub telefono: String,
    #[serde(default)]
    pub azienda: Option<String>,
    #[serde(default)]
    pub messaggio: Option<String>,
    #[serde(default)]
    pub privacy_consent: bool,
    #[serde(default)]
    pub form_type: Option<String>,
}

/// A single failed validation rule.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("Nome valido richiesto (minimo 2 caratteri)")]
    Nome,
    #[error("Indirizzo email valido richiesto")]
    Email,
    #[error("Numero di telefono valido richiesto")]
    Telefono,
    #[error("È necessario accettare l'informativa privacy")]
    PrivacyConsent,
}

impl ContactSubmission {
    /// Checks every rule and returns all violations.
    pub fn validate(&self) -> Result<(), Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        if self.nome.trim().chars().count() < 2 {
            issues.push(ValidationIssue::Nome);
        }
        if !EMAIL_PATTERN.is_match(self.email.trim()) {
            issues.push(ValidationIssue::Email);
        }
        if !PHONE_PATTERN.is_match(self.telefono.trim()) {
            issues.push(ValidationIssue::Telefono);
        }
        if !self.privacy_consent {
            issues.push(ValidationIssue::PrivacyConsent);
        }

        if issues.is_empty() { Ok(()) } else { Err(issues) }
    }
}
