//! Provider error classification.
//!
//! Providers report failures as free-text messages; the rest of the
//! application wants a stable `GenerationErrorKind`. The substring
//! heuristics live here and nowhere else, so a provider changing its
//! wording is a one-file fix.

use pedisafe_core::GenerationErrorKind;

/// Classify a provider error message.
///
/// Best-effort: unknown messages map to `Other`, which is always safe to
/// surface verbatim.
pub fn classify(message: &str) -> GenerationErrorKind {
    let lower = message.to_lowercase();

    if lower.contains("insufficient_quota") || lower.contains("rate_limit") {
        GenerationErrorKind::QuotaExceeded
    } else if lower.contains("invalid_api_key") {
        GenerationErrorKind::InvalidCredential
    } else if lower.contains("timed out") || lower.contains("timeout") {
        GenerationErrorKind::Timeout
    } else {
        GenerationErrorKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_errors() {
        assert_eq!(
            classify("Error code 429: insufficient_quota"),
            GenerationErrorKind::QuotaExceeded
        );
        assert_eq!(
            classify("rate_limit_exceeded: try again later"),
            GenerationErrorKind::QuotaExceeded
        );
    }

    #[test]
    fn test_credential_errors() {
        assert_eq!(
            classify("invalid_api_key: Incorrect API key provided"),
            GenerationErrorKind::InvalidCredential
        );
    }

    #[test]
    fn test_timeout_errors() {
        assert_eq!(
            classify("request timed out after 60s"),
            GenerationErrorKind::Timeout
        );
    }

    #[test]
    fn test_unknown_errors() {
        assert_eq!(
            classify("server exploded in a novel way"),
            GenerationErrorKind::Other
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            classify("INVALID_API_KEY"),
            GenerationErrorKind::InvalidCredential
        );
    }
}
