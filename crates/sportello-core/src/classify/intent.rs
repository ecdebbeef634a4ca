//! Intent detection over fixed-priority keyword groups.

use crate::signals::Intent;

/// Groups are checked in this order; the first with a hit wins. Emergency
/// wording must shadow everything else, support requests shadow quotes, and
/// so on down to plain information requests.
static INTENT_GROUPS: &[(Intent, &[&str])] = &[
    (
        Intent::Emergency,
        &["emergenza", "urgente", "subito", "immediato"],
    ),
    (
        Intent::RequestSupport,
        &[
            "aiuto",
            "supporto",
            "problema",
            "assistenza",
            "non funziona",
            "guasto",
        ],
    ),
    (
        Intent::GetQuote,
        &["preventivo", "prezzo", "costo", "quanto costa"],
    ),
    (
        Intent::Contact,
        &["contatto", "telefono", "email", "chiamare", "chiamatemi"],
    ),
    (
        Intent::GetInfo,
        &["info", "informazioni", "cosa", "come", "quando", "servizi"],
    ),
];

/// Labels the user's intent, defaulting to [`Intent::General`] when no
/// keyword group matches.
pub fn detect_intent(text: &str) -> Intent {
    let lowered = text.to_lowercase();

    for (intent, terms) in INTENT_GROUPS {
        if terms.iter().any(|t| lowered.contains(*t)) {
            return *intent;
        }
    }

    Intent::General
}
