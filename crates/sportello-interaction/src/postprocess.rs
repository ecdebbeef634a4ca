//! Post-processing of capability output.
//!
//! Order matters: the leak scrub runs first and discards the whole text,
//! because a response that echoes internal instructions must never reach the
//! user, not even partially (a confidentiality failure, not a cosmetic one).
//! Only clean text gets the emergency banner and compliance notes.

use crate::prompt::{CLASSIFICATION_HEADER, SYSTEM_RULES_HEADER};
use sportello_core::{EngineConfig, Sector, SignalSet, UrgencyLevel};

/// Substrings that only ever occur in internal prompt material.
static LEAK_MARKERS: &[&str] = &["SYSTEM_PROMPT", SYSTEM_RULES_HEADER, CLASSIFICATION_HEADER];

/// Returns true when the text echoes internal prompt material.
pub fn contains_leak(text: &str) -> bool {
    let upper = text.to_uppercase();
    LEAK_MARKERS.iter().any(|marker| upper.contains(marker))
}

/// Applies the post-processing rules to capability output.
///
/// Returns `None` when the text must be discarded (prompt leak); the caller
/// is expected to fall back to canned text. Otherwise returns the text with
/// the emergency banner and/or compliance note applied.
pub fn postprocess(config: &EngineConfig, signals: &SignalSet, text: String) -> Option<String> {
    if contains_leak(&text) {
        return None;
    }

    let mut out = text;

    if signals.urgency.level == UrgencyLevel::Critical && !out.contains(&config.contact.phone) {
        out = format!(
            "🚨 EMERGENZA: chiama subito il {}: {}.\n\n{out}",
            config.contact.phone, config.contact.response_promise
        );
    }

    if signals.sector.sector.is_regulated() && !out.to_lowercase().contains("gdpr") {
        out.push_str(&compliance_note(config, signals.sector.sector));
    }

    Some(out)
}

fn compliance_note(config: &EngineConfig, sector: Sector) -> String {
    let company = &config.contact.company_name;
    match sector {
        Sector::Medical => {
            format!("\n\n{company} garantisce la compliance GDPR per i dati sanitari.")
        }
        Sector::Legal => {
            format!("\n\n{company} assicura la compliance GDPR per gli studi legali.")
        }
        // Not regulated, no note.
        _ => String::new(),
    }
}
