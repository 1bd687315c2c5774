//! Triage urgency levels.
//!
//! Static configuration data: each level has a fixed emoji, display color
//! and localized description/action. `detect_level` finds the level a
//! generated response declared, for callers that want to surface it
//! separately (UI badges, logs).

use serde::{Deserialize, Serialize};

use pedisafe_prompt::Language;

/// Four-tier urgency scale, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageLevel {
    Red,
    Orange,
    Yellow,
    Green,
}

impl TriageLevel {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Red => "🔴",
            Self::Orange => "🟠",
            Self::Yellow => "🟡",
            Self::Green => "🟢",
        }
    }

    /// Display color (hex), for UI layers.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Red => "#dc3545",
            Self::Orange => "#fd7e14",
            Self::Yellow => "#ffc107",
            Self::Green => "#28a745",
        }
    }

    pub fn description(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Red, Language::En) => "EMERGENCY - Seek IMMEDIATE medical attention",
            (Self::Orange, Language::En) => "HIGH PRIORITY - Contact pediatrician today",
            (Self::Yellow, Language::En) => "MONITOR - Watch for changes",
            (Self::Green, Language::En) => "LOW RISK - Home care appropriate",
            (Self::Red, Language::Es) => "URGENCIA - Busca atención médica INMEDIATA",
            (Self::Orange, Language::Es) => "PRIORIDAD ALTA - Contacta al pediatra hoy",
            (Self::Yellow, Language::Es) => "MONITOREAR - Vigila la evolución",
            (Self::Green, Language::Es) => "BAJO RIESGO - Cuidados en casa apropiados",
        }
    }

    pub fn action(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Red, Language::En) => "Call 911 or go to ER now",
            (Self::Orange, Language::En) => "Call your pediatrician as soon as possible",
            (Self::Yellow, Language::En) => "Home care is okay, but stay alert",
            (Self::Green, Language::En) => "Comfort measures and observation",
            (Self::Red, Language::Es) => "Llama al 911 o ve a urgencias ahora",
            (Self::Orange, Language::Es) => "Llama a tu pediatra lo antes posible",
            (Self::Yellow, Language::Es) => "Puedes cuidar en casa, pero mantente atento",
            (Self::Green, Language::Es) => "Medidas de confort y observación",
        }
    }

    /// Words a generated response may use to declare this level.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Red => &["RED", "ROJO"],
            Self::Orange => &["ORANGE", "NARANJA"],
            Self::Yellow => &["YELLOW", "AMARILLO"],
            Self::Green => &["GREEN", "VERDE"],
        }
    }
}

/// All levels, most urgent first.
pub const ALL_LEVELS: [TriageLevel; 4] = [
    TriageLevel::Red,
    TriageLevel::Orange,
    TriageLevel::Yellow,
    TriageLevel::Green,
];

/// Find the urgency level a response text declares.
///
/// Emoji markers are checked first (the response format mandates them),
/// then the level words in either language. When several levels appear,
/// the most urgent wins. `None` when the text declares no level.
pub fn detect_level(text: &str) -> Option<TriageLevel> {
    for level in ALL_LEVELS {
        if text.contains(level.emoji()) {
            return Some(level);
        }
    }

    let upper = text.to_uppercase();
    for level in ALL_LEVELS {
        if level.keywords().iter().any(|word| upper.contains(word)) {
            return Some(level);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_emoji() {
        assert_eq!(detect_level("🟡 **YELLOW - MONITOR**"), Some(TriageLevel::Yellow));
        assert_eq!(detect_level("🔴 go to the ER"), Some(TriageLevel::Red));
    }

    #[test]
    fn test_detect_by_word_bilingual() {
        assert_eq!(detect_level("**NARANJA - PRIORIDAD ALTA**"), Some(TriageLevel::Orange));
        assert_eq!(detect_level("level: green, home care"), Some(TriageLevel::Green));
    }

    #[test]
    fn test_most_urgent_wins() {
        // A red recommendation that also lists yellow watch criteria
        let text = "🔴 RED. If it were milder this would be 🟡 YELLOW.";
        assert_eq!(detect_level(text), Some(TriageLevel::Red));
    }

    #[test]
    fn test_no_level_declared() {
        assert_eq!(detect_level("please tell me the temperature"), None);
    }

    #[test]
    fn test_static_metadata() {
        assert_eq!(TriageLevel::Red.color(), "#dc3545");
        assert_eq!(TriageLevel::Green.emoji(), "🟢");
        assert!(TriageLevel::Orange
            .description(Language::Es)
            .contains("PRIORIDAD ALTA"));
        assert!(TriageLevel::Yellow
            .action(Language::En)
            .contains("stay alert"));
    }
}
