//! Engine configuration.
//!
//! Thresholds and contact identity are configuration, not code: the urgency
//! cut-offs were chosen ad hoc against real conversations and only their
//! relative ordering is contractual. Everything here deserializes from TOML
//! and falls back to the defaults of the production deployment.

use crate::error::{Result, SportelloError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Score cut-offs mapping an urgency score to an [`crate::signals::UrgencyLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyThresholds {
    /// Minimum score for `Moderate`.
    #[serde(default = "default_moderate")]
    pub moderate: u32,
    /// Minimum score for `High`.
    #[serde(default = "default_high")]
    pub high: u32,
    /// Minimum score for `Critical`.
    #[serde(default = "default_critical")]
    pub critical: u32,
}

fn default_moderate() -> u32 {
    1
}

fn default_high() -> u32 {
    7
}

fn default_critical() -> u32 {
    15
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            moderate: default_moderate(),
            high: default_high(),
            critical: default_critical(),
        }
    }
}

/// Company identity surfaced in responses and escalation messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactIdentity {
    #[serde(default = "default_company_name")]
    pub company_name: String,
    /// Support phone number; always surfaced on the emergency path.
    #[serde(default = "default_phone")]
    pub phone: String,
    #[serde(default = "default_email")]
    pub email: String,
    /// Service-level wording quoted to users ("risposta in 15 minuti").
    #[serde(default = "default_response_promise")]
    pub response_promise: String,
}

fn default_company_name() -> String {
    "IT-ERA".to_string()
}

fn default_phone() -> String {
    "039 888 2041".to_string()
}

fn default_email() -> String {
    "info@it-era.it".to_string()
}

fn default_response_promise() -> String {
    "risposta garantita in 15 minuti".to_string()
}

impl Default for ContactIdentity {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            phone: default_phone(),
            email: default_email(),
            response_promise: default_response_promise(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub urgency: UrgencyThresholds,
    #[serde(default)]
    pub contact: ContactIdentity,
    /// Maximum turns kept per session.
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,
    /// How many recent turns are replayed into the AI prompt.
    #[serde(default = "default_context_turns")]
    pub context_turns: usize,
    /// Deadline for a single capability call, in seconds.
    #[serde(default = "default_capability_timeout_secs")]
    pub capability_timeout_secs: u64,
}

fn default_history_cap() -> usize {
    5
}

fn default_context_turns() -> usize {
    5
}

fn default_capability_timeout_secs() -> u64 {
    8
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            urgency: UrgencyThresholds::default(),
            contact: ContactIdentity::default(),
            history_cap: default_history_cap(),
            context_turns: default_context_turns(),
            capability_timeout_secs: default_capability_timeout_secs(),
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a TOML string, applying defaults for
    /// missing fields.
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed TOML, or a config error
    /// when threshold ordering is violated.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file from disk.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SportelloError::io(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks invariants that serde cannot express.
    fn validate(&self) -> Result<()> {
        if self.urgency.moderate > self.urgency.high || self.urgency.high > self.urgency.critical {
            return Err(SportelloError::config(format!(
                "urgency thresholds must be ordered moderate <= high <= critical, got {} / {} / {}",
                self.urgency.moderate, self.urgency.high, self.urgency.critical
            )));
        }
        if self.history_cap == 0 {
            return Err(SportelloError::config("history_cap must be at least 1"));
        }
        if self.capability_timeout_secs == 0 {
            return Err(SportelloError::config(
                "capability_timeout_secs must be at least 1",
            ));
        }
        Ok(())
    }
}
