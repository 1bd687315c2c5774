//! Text generation client trait and request/response types.

use pedisafe_core::AppResult;

/// A completion request. The system prompt and the user prompt are composed
/// upstream; the client only transports them.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// System prompt (instructions, retrieved context, safety rules)
    pub system: String,

    /// User-facing prompt (caregiver message, alert-prefixed when flagged)
    pub prompt: String,

    /// Sampling temperature. 0.3 keeps medical wording conservative.
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl LlmRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: 0.3,
            max_tokens: 1000,
        }
    }
}

/// A completion response.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated text
    pub content: String,

    /// Model that produced the response, as reported by the provider
    pub model: String,
}

/// Trait for text generation backends.
///
/// Failures surface as `AppError::Generation` with a best-effort
/// `GenerationErrorKind` so callers can tell quota exhaustion from a bad
/// credential without parsing provider messages themselves.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync + std::fmt::Debug {
    /// Provider name (e.g., "openai", "cerebras")
    fn provider_name(&self) -> &str;

    /// Generate a completion.
    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse>;
}
