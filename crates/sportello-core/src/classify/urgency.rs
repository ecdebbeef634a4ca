//! Urgency detection with weighted keyword tiers.

use crate::config::UrgencyThresholds;
use crate::signals::{Urgency, UrgencyLevel};
use once_cell::sync::Lazy;

/// A keyword tier and the score each hit in it contributes.
struct Tier {
    weight: u32,
    terms: &'static [&'static str],
}

/// Tier weights mirror how the heuristics were originally tuned: emergency
/// wording dominates, informational wording barely registers.
static TIERS: Lazy<Vec<Tier>> = Lazy::new(|| {
    vec![
        Tier {
            weight: 10,
            terms: &[
                "emergenza",
                "down",
                "bloccato",
                "hackerato",
                "ransomware",
                "virus",
                "non funziona",
                "attacco",
                "dati persi",
            ],
        },
        Tier {
            weight: 7,
            terms: &["urgente", "subito", "immediato", "problema grave", "server"],
        },
        Tier {
            weight: 4,
            terms: &["problema", "aiuto", "supporto", "lento"],
        },
        Tier {
            weight: 1,
            terms: &["informazione", "preventivo", "consulenza"],
        },
    ]
});

/// Scans `text` for urgency keywords and maps the accumulated score to a
/// level through the configured thresholds.
///
/// Empty or whitespace-only input yields `{score: 0, level: None}`.
pub fn detect_urgency(text: &str, thresholds: &UrgencyThresholds) -> Urgency {
    if text.trim().is_empty() {
        return Urgency::default();
    }

    let lowered = text.to_lowercase();
    let mut score = 0u32;
    for tier in TIERS.iter() {
        let hits = tier.terms.iter().filter(|t| lowered.contains(**t)).count() as u32;
        score += hits * tier.weight;
    }

    Urgency {
        score,
        level: level_for(score, thresholds),
    }
}

fn level_for(score: u32, thresholds: &UrgencyThresholds) -> UrgencyLevel {
    if score >= thresholds.critical {
        UrgencyLevel::Critical
    } else if score >= thresholds.high {
        UrgencyLevel::High
    } else if score >= thresholds.moderate {
        UrgencyLevel::Moderate
    } else {
        UrgencyLevel::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> Urgency {
        detect_urgency(text, &UrgencyThresholds::default())
    }

    #[test]
    fn test_empty_text_is_not_urgent() {
        assert_eq!(detect(""), Urgency::default());
        assert_eq!(detect("   \t\n "), Urgency::default());
    }

    #[test]
    fn test_plain_question_is_not_urgent() {
        let urgency = detect("Quanto costa un firewall WatchGuard?");
        assert_eq!(urgency.score, 0);
        assert_eq!(urgency.level, UrgencyLevel::None);
    }

    #[test]
    fn test_emergency_words_reach_at_least_moderate() {
        for text in ["c'è un'emergenza in ufficio", "è urgente, per favore"] {
            let urgency = detect(text);
            assert!(
                urgency.level >= UrgencyLevel::Moderate,
                "{text:?} scored {urgency:?}"
            );
        }
    }

    #[test]
    fn test_server_outage_is_critical() {
        let urgency = detect("Il server è down da questa mattina, è urgente!");
        assert_eq!(urgency.level, UrgencyLevel::Critical);
        assert!(urgency.score >= 15);
    }

    #[test]
    fn test_level_respects_configured_thresholds() {
        let strict = UrgencyThresholds {
            moderate: 1,
            high: 5,
            critical: 10,
        };
        let urgency = detect_urgency("ransomware", &strict);
        assert_eq!(urgency.level, UrgencyLevel::Critical);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let urgency = detect("RANSOMWARE! SUBITO!");
        assert_eq!(urgency.level, UrgencyLevel::Critical);
    }

    #[test]
    fn test_distinct_keywords_accumulate() {
        let single = detect("abbiamo un problema");
        let double = detect("abbiamo un problema, serve aiuto");
        assert!(double.score > single.score);
    }
}
