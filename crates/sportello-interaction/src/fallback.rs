//! Canned response texts for when the capability is skipped or fails.
//!
//! Every text carries the support phone number: the fallback path exists so
//! the user always walks away with a way to reach a human.

use rand::Rng;
use sportello_core::{EngineConfig, Intent};

/// Selects the fallback response for an intent. Deterministic per intent,
/// except `General` which rotates among a small set of acknowledgements.
pub fn fallback_text(config: &EngineConfig, intent: Intent) -> String {
    let contact = &config.contact;
    let company = &contact.company_name;
    let phone = &contact.phone;

    match intent {
        Intent::Emergency => format!(
            "🚨 Per le emergenze IT chiama subito {company} al {phone}: {}.",
            contact.response_promise
        ),
        Intent::RequestSupport => format!(
            "Il nostro team di assistenza può aiutarti: chiama il {phone} o scrivi a {}. \
             Descrivi il problema e un tecnico ti ricontatta al più presto.",
            contact.email
        ),
        Intent::GetQuote => format!(
            "Prepariamo preventivi su misura entro 24 ore. Lasciaci i dettagli a {} \
             o chiama il {phone} per parlarne subito.",
            contact.email
        ),
        Intent::Contact => format!(
            "Puoi raggiungerci al {phone} oppure via email a {}. Siamo operativi \
             per le aziende di tutta la Lombardia.",
            contact.email
        ),
        Intent::GetInfo => format!(
            "{company} si occupa di assistenza IT, cybersecurity, cloud e backup, \
             VoIP e soluzioni per studi medici e legali. Per saperne di più chiama il {phone}."
        ),
        Intent::General => general_acknowledgement(config),
    }
}

fn general_acknowledgement(config: &EngineConfig) -> String {
    let contact = &config.contact;
    let texts = [
        format!(
            "Ciao! Sono l'assistente di {}. Per assistenza immediata chiama il {}: {}.",
            contact.company_name, contact.phone, contact.response_promise
        ),
        format!(
            "Problemi IT? Contatta {} al {}: assistenza professionale per le aziende.",
            contact.company_name, contact.phone
        ),
        format!(
            "Raccontami pure la tua esigenza, oppure chiama il {} per parlare con un tecnico.",
            contact.phone
        ),
        format!(
            "Sono qui per aiutarti. Per un riscontro immediato il numero è {}.",
            contact.phone
        ),
    ];

    let index = rand::thread_rng().gen_range(0..texts.len());
    texts[index].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sportello_core::EngineConfig;

    #[test]
    fn test_every_intent_has_nonempty_text_with_phone() {
        let config = EngineConfig::default();
        for intent in [
            Intent::GetInfo,
            Intent::RequestSupport,
            Intent::GetQuote,
            Intent::Emergency,
            Intent::Contact,
            Intent::General,
        ] {
            let text = fallback_text(&config, intent);
            assert!(!text.is_empty(), "{intent} produced empty fallback");
            assert!(
                text.contains(&config.contact.phone),
                "{intent} fallback is missing the phone number"
            );
        }
    }

    #[test]
    fn test_non_general_intents_are_deterministic() {
        let config = EngineConfig::default();
        assert_eq!(
            fallback_text(&config, Intent::GetQuote),
            fallback_text(&config, Intent::GetQuote)
        );
    }

    #[test]
    fn test_general_rotation_stays_in_the_fixed_set() {
        let config = EngineConfig::default();
        for _ in 0..20 {
            let text = fallback_text(&config, Intent::General);
            assert!(!text.is_empty());
        }
    }
}
