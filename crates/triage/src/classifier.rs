//! Deterministic red-flag pre-classification.
//!
//! Runs before any model call and independently of retrieval. Neonatal
//! fever is always an emergency; that decision is made here by fixed rules
//! and injected into the prompt as an instruction, never left to the
//! model's judgment.

use serde::{Deserialize, Serialize};

use crate::extract::{extract_age_months, extract_temperature_celsius};

/// Bilingual red-flag vocabulary, in match-priority order. Matching is
/// substring-based, which accepts multi-word phrases ("stiff neck",
/// "manchas púrpuras") at the cost of rare partial-word false positives.
pub const RED_FLAGS: [&str; 19] = [
    "convulsión",
    "seizure",
    "convulsion",
    "no respira",
    "dificultad respiratoria",
    "breathing difficulty",
    "piel azul",
    "blue skin",
    "cianosis",
    "rigidez cuello",
    "stiff neck",
    "inconsciente",
    "unresponsive",
    "no responde",
    "manchas púrpuras",
    "purple spots",
    "petequias",
    "fontanela abultada",
    "bulging fontanelle",
];

/// Fever threshold for infants under 3 months, in Celsius.
const INFANT_FEVER_C: f32 = 38.0;

/// High-fever threshold for the 3 to 6 month band, in Celsius.
const YOUNG_INFANT_HIGH_FEVER_C: f32 = 39.0;

/// Per-message classification result. Created fresh per request, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageSignal {
    /// Extracted age in whole months, when mentioned
    pub age_months: Option<u32>,

    /// Extracted temperature in Celsius, when mentioned
    pub temperature_celsius: Option<f32>,

    /// The matched rule or vocabulary entry, when a detector fired
    pub red_flag_matched: Option<String>,

    /// Whether any red-flag detector fired
    pub is_red_flag: bool,
}

/// Classify a caregiver message.
///
/// Two detectors, in priority order: the structured age+temperature rule
/// first, then the keyword vocabulary. When both would fire, the signal
/// carries the structured rule's reason. Pure function; "no match" is an
/// ordinary outcome, not an error.
pub fn classify(message: &str) -> TriageSignal {
    let age_months = extract_age_months(message);
    let temperature_celsius = extract_temperature_celsius(message);

    if let (Some(age), Some(temp)) = (age_months, temperature_celsius) {
        if age < 3 && temp >= INFANT_FEVER_C {
            return TriageSignal {
                age_months,
                temperature_celsius,
                red_flag_matched: Some("infant <3mo with fever".to_string()),
                is_red_flag: true,
            };
        }
        if (3..6).contains(&age) && temp >= YOUNG_INFANT_HIGH_FEVER_C {
            return TriageSignal {
                age_months,
                temperature_celsius,
                red_flag_matched: Some("infant 3-6mo high fever".to_string()),
                is_red_flag: true,
            };
        }
    }

    let lower = message.to_lowercase();
    for flag in RED_FLAGS {
        if lower.contains(flag) {
            return TriageSignal {
                age_months,
                temperature_celsius,
                red_flag_matched: Some(flag.to_string()),
                is_red_flag: true,
            };
        }
    }

    TriageSignal {
        age_months,
        temperature_celsius,
        red_flag_matched: None,
        is_red_flag: false,
    }
}
