//! Heuristic age and temperature extraction from caregiver messages.
//!
//! Pure, stateless regex extraction. "Not found" is `None`, never zero or a
//! sentinel value; the assistant then asks clarifying questions instead of
//! guessing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Age patterns, tried in order. English and Spanish forms; the first
/// matching pattern wins, so months take precedence over a bare
/// "bebé de N" mention.
static AGE_MONTHS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)[\s-]*(?:months?|mes(?:es)?\b)").unwrap());
static AGE_YEARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)[\s-]*(?:years?|años?\b)").unwrap());
static AGE_WEEKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)[\s-]*(?:weeks?|semanas?)").unwrap());
static AGE_BABY_OF: Lazy<Regex> = Lazy::new(|| Regex::new(r"beb[eé]\s*de\s*(\d+)").unwrap());

/// Temperature patterns, tried in order: degree symbol, spelled-out
/// degrees, labeled prefix, bare C/F suffix.
static TEMP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(\d+(?:\.\d+)?)\s*°\s*[cCfF]?").unwrap(),
        Regex::new(r"(\d+(?:\.\d+)?)\s*(?:degrees|grados)").unwrap(),
        Regex::new(r"(?:temperature|temperatura|fever of|fiebre de)\s*:?\s*(\d+(?:\.\d+)?)")
            .unwrap(),
        Regex::new(r"(\d+(?:\.\d+)?)\s*[cCfF]\b").unwrap(),
    ]
});

/// Extract the child's age in whole months, if mentioned.
///
/// Years convert at 12 months each; weeks at 0.25 months each, rounded to
/// the nearest whole month.
pub fn extract_age_months(message: &str) -> Option<u32> {
    let lower = message.to_lowercase();

    if let Some(captures) = AGE_MONTHS.captures(&lower) {
        return captures[1].parse::<u32>().ok();
    }
    if let Some(captures) = AGE_YEARS.captures(&lower) {
        return captures[1]
            .parse::<u32>()
            .ok()
            .and_then(|y| y.checked_mul(12));
    }
    if let Some(captures) = AGE_WEEKS.captures(&lower) {
        return captures[1]
            .parse::<u32>()
            .ok()
            .map(|w| (w as f64 * 0.25).round() as u32);
    }
    if let Some(captures) = AGE_BABY_OF.captures(&lower) {
        return captures[1].parse::<u32>().ok();
    }

    None
}

/// Extract the reported temperature in Celsius, if mentioned.
///
/// Values above 45 are assumed Fahrenheit and converted, rounded to one
/// decimal place.
pub fn extract_temperature_celsius(message: &str) -> Option<f32> {
    let lower = message.to_lowercase();

    for pattern in TEMP_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(&lower) {
            let value: f32 = captures[1].parse().ok()?;
            let celsius = if value > 45.0 {
                let converted = (value - 32.0) * 5.0 / 9.0;
                (converted * 10.0).round() / 10.0
            } else {
                value
            };
            return Some(celsius);
        }
    }

    None
}
