//! Embedding provider trait and factory.

use pedisafe_core::{AppError, AppResult, ProviderProfile};
use std::sync::Arc;

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "openai", "trigram")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::KnowledgeLoad("No embedding returned".to_string()))
    }

    /// Identity stamped on indexes built with this provider, compared on
    /// every retrieval to reject cross-provider queries.
    fn fingerprint(&self) -> String {
        format!("{}/{}", self.provider_name(), self.model_name())
    }
}

/// Create the embedding provider for a provider profile.
///
/// Profiles without an embedding model (Cerebras serves chat only) fall
/// back to the local trigram provider so retrieval keeps working offline.
pub fn create_provider(
    profile: &ProviderProfile,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match &profile.embedding_model {
        Some(model) => {
            let key = api_key.ok_or_else(|| {
                AppError::Config(format!(
                    "Provider '{}' requires an API key for embeddings (set {})",
                    profile.kind.as_str(),
                    profile.api_key_env
                ))
            })?;
            let provider = super::providers::openai::OpenAiEmbeddingProvider::new(
                &profile.endpoint,
                model,
                key,
                profile.timeout_secs,
            )?;
            Ok(Arc::new(provider))
        }
        None => {
            tracing::info!(
                provider = profile.kind.as_str(),
                "No embedding model for provider, using local trigram embeddings"
            );
            Ok(Arc::new(super::providers::trigram::TrigramProvider::new(
                384,
            )))
        }
    }
}
