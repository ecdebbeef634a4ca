//! Keyword/pattern matchers turning raw text into a [`SignalSet`].
//!
//! All matchers are pure and total: they never fail, never touch I/O, and
//! always return a value from their declared range. Matching is
//! case-insensitive substring search with no stemming, same as the keyword
//! heuristics they were tuned against.

mod intent;
mod sector;
mod sentiment;
mod urgency;

pub use intent::detect_intent;
pub use sector::detect_sector;
pub use sentiment::detect_sentiment;
pub use urgency::detect_urgency;

use crate::config::UrgencyThresholds;
use crate::signals::SignalSet;

/// Computes the full signal set for one message.
pub fn classify(text: &str, thresholds: &UrgencyThresholds) -> SignalSet {
    SignalSet {
        urgency: detect_urgency(text, thresholds),
        sector: detect_sector(text),
        intent: detect_intent(text),
        sentiment: detect_sentiment(text),
    }
}

/// Confidence for `count` matched terms: deterministic, strictly monotonic
/// until it saturates at 1.0.
pub(crate) fn confidence_for_matches(count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    (0.6 + 0.2 * (count as f32 - 1.0)).min(1.0)
}
