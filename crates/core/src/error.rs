//! Error types for PediSafe.
//!
//! This module defines a unified error enum covering all failure categories
//! in the application: knowledge base loading, provider mismatches, text
//! generation, configuration, and I/O.

use thiserror::Error;

/// Classification of generation-service failures.
///
/// Populated by best-effort substring inspection of the underlying
/// provider error (see `pedisafe-llm`); not guaranteed exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    /// Quota or rate limit exhausted; recoverable with a different credential.
    QuotaExceeded,
    /// The credential was rejected by the provider.
    InvalidCredential,
    /// The request exceeded its deadline. Not retried automatically.
    Timeout,
    /// Anything we could not classify.
    Other,
}

impl GenerationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuotaExceeded => "quota_exceeded",
            Self::InvalidCredential => "invalid_credential",
            Self::Timeout => "timeout",
            Self::Other => "other",
        }
    }
}

/// Unified error type for PediSafe.
///
/// All fallible functions return `Result<T, AppError>`; errors are
/// represented and propagated, never panicked. Absence of a signal (no red
/// flag, no relevant chunk, no extractable age) is NOT an error; those are
/// ordinary return values.
#[derive(Error, Debug)]
pub enum AppError {
    /// The knowledge directory is missing or holds no markdown files.
    /// Fatal at startup: without an index there is nothing to answer from.
    #[error("Knowledge load error: {0}")]
    KnowledgeLoad(String),

    /// A query was embedded with a different provider than the one that
    /// built the index. Programmer error; fail fast rather than return
    /// meaningless similarities.
    #[error("Embedding provider mismatch: index built with '{index}', query embedded with '{query}'")]
    ProviderMismatch { index: String, query: String },

    /// The text-generation service failed.
    #[error("Generation error ({}): {message}", kind.as_str())]
    Generation {
        kind: GenerationErrorKind,
        message: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Prompt composition errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Shorthand for a generation error of a given kind.
    pub fn generation(kind: GenerationErrorKind, message: impl Into<String>) -> Self {
        AppError::Generation {
            kind,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
