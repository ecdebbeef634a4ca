//! Small-lexicon sentiment detection.

use super::confidence_for_matches;
use crate::signals::{Sentiment, SentimentGuess};

static POSITIVE_TERMS: &[&str] = &[
    "grazie",
    "perfetto",
    "ottimo",
    "bene",
    "soddisfatto",
    "risolto",
];

static NEGATIVE_TERMS: &[&str] = &[
    "male",
    "sbagliato",
    "insoddisfatto",
    "arrabbiato",
    "frustrato",
    "errore",
    "deluso",
];

/// Counts hits against the positive and negative word lists.
///
/// Positive-only hits yield `Positive`, negative-only `Negative`; ties and
/// texts matching neither list resolve to `Neutral`.
pub fn detect_sentiment(text: &str) -> SentimentGuess {
    let lowered = text.to_lowercase();

    let positive = POSITIVE_TERMS
        .iter()
        .filter(|t| lowered.contains(**t))
        .count();
    let negative = NEGATIVE_TERMS
        .iter()
        .filter(|t| lowered.contains(**t))
        .count();

    if positive > 0 && negative == 0 {
        SentimentGuess {
            sentiment: Sentiment::Positive,
            confidence: confidence_for_matches(positive),
        }
    } else if negative > 0 && positive == 0 {
        SentimentGuess {
            sentiment: Sentiment::Negative,
            confidence: confidence_for_matches(negative),
        }
    } else {
        SentimentGuess::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_only() {
        let guess = detect_sentiment("grazie, tutto perfetto!");
        assert_eq!(guess.sentiment, Sentiment::Positive);
        assert!(guess.confidence > 0.0);
    }

    #[test]
    fn test_negative_only() {
        let guess = detect_sentiment("sono davvero frustrato, è tutto sbagliato");
        assert_eq!(guess.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_mixed_resolves_to_neutral() {
        let guess = detect_sentiment("grazie, ma sono ancora arrabbiato");
        assert_eq!(guess.sentiment, Sentiment::Neutral);
        assert_eq!(guess.confidence, 0.0);
    }

    #[test]
    fn test_no_hits_is_neutral() {
        assert_eq!(detect_sentiment("").sentiment, Sentiment::Neutral);
        assert_eq!(
            detect_sentiment("vorrei migrare la posta").sentiment,
            Sentiment::Neutral
        );
    }
}
