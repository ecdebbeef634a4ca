//! Classification signals derived from a single user message.
//!
//! A [`SignalSet`] is computed fresh for every incoming message by the
//! matchers in [`crate::classify`] and is never mutated afterwards. It is
//! serializable because the engine forwards it to the remote capability as
//! contextual hints.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Urgency level of a message, derived from its urgency score.
///
/// The ordering `None < Moderate < High < Critical` is the contractual part;
/// the numeric thresholds that map scores to levels live in configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UrgencyLevel {
    /// No urgency signal detected.
    #[default]
    None,
    /// At least one urgency keyword hit.
    Moderate,
    /// Strong urgency wording (outage, blocking problem).
    High,
    /// Emergency wording; always routes to the emergency path.
    Critical,
}

/// Urgency score and the level it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Urgency {
    /// Accumulated keyword score. Unbounded, in practice 0-30.
    pub score: u32,
    /// Step function of `score` over the configured thresholds.
    pub level: UrgencyLevel,
}

/// Business sector guessed from the message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Sector {
    /// No sector-specific wording detected.
    #[default]
    General,
    Medical,
    Legal,
    Industrial,
    Financial,
}

impl Sector {
    /// Regulated sectors get a compliance note appended to AI responses.
    pub fn is_regulated(&self) -> bool {
        matches!(self, Sector::Medical | Sector::Legal)
    }
}

/// Sector guess with a deterministic confidence in `0.0..=1.0`.
///
/// Confidence is monotonic in the number of matched sector terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SectorGuess {
    pub sector: Sector,
    pub confidence: f32,
}

/// What the user is trying to accomplish with this message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    GetInfo,
    RequestSupport,
    GetQuote,
    Emergency,
    Contact,
    /// Fallback when no intent keyword group matches.
    #[default]
    General,
}

/// Coarse sentiment of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

/// Sentiment guess with a confidence in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SentimentGuess {
    pub sentiment: Sentiment,
    pub confidence: f32,
}

/// The full set of signals computed for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SignalSet {
    pub urgency: Urgency,
    pub sector: SectorGuess,
    pub intent: Intent,
    pub sentiment: SentimentGuess,
}
