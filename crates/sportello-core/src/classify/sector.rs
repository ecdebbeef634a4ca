//! Sector detection from domain-specific wording.

use super::confidence_for_matches;
use crate::signals::{Sector, SectorGuess};

/// Per-sector keyword sets, checked in declaration order. The first sector
/// with at least one hit wins.
static SECTOR_TERMS: &[(Sector, &[&str])] = &[
    (
        Sector::Medical,
        &[
            "clinica",
            "paziente",
            "sanitario",
            "cartelle cliniche",
            "studio medico",
            "telemedicina",
        ],
    ),
    (
        Sector::Legal,
        &[
            "studio legale",
            "avvocato",
            "tribunale",
            "pratica legale",
            "notaio",
        ],
    ),
    (
        Sector::Industrial,
        &["manifatturiero", "produzione", "stabilimento", "macchinari"],
    ),
    (
        Sector::Financial,
        &["banca", "assicurazione", "finanziario", "bilancio"],
    ),
];

/// Guesses the business sector of a message.
///
/// Confidence grows with the number of matched terms for the winning sector
/// and saturates at 1.0. Text with no sector wording maps to
/// `{General, 0.0}`.
pub fn detect_sector(text: &str) -> SectorGuess {
    let lowered = text.to_lowercase();

    for (sector, terms) in SECTOR_TERMS {
        let matches = terms.iter().filter(|t| lowered.contains(**t)).count();
        if matches > 0 {
            return SectorGuess {
                sector: *sector,
                confidence: confidence_for_matches(matches),
            };
        }
    }

    SectorGuess::default()
}
