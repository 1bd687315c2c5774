//! OpenAI-compatible embedding provider over HTTP.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::embeddings::provider::EmbeddingProvider;
use pedisafe_core::{AppError, AppResult};

/// Remote embedding provider speaking the OpenAI `/embeddings` API.
pub struct OpenAiEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    dimensions: usize,
}

impl std::fmt::Debug for OpenAiEmbeddingProvider {
    // api_key stays out of Debug output so it can never leak into logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEmbeddingProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

fn model_dimensions(model: &str) -> usize {
    match model {
        "text-embedding-3-small" => 1536,
        "text-embedding-3-large" => 3072,
        _ => 1536,
    }
}

impl OpenAiEmbeddingProvider {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: &str,
        timeout_secs: u64,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::KnowledgeLoad(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            dimensions: model_dimensions(model),
        })
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        tracing::debug!(model = %self.model, batch = texts.len(), "Requesting embeddings");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::KnowledgeLoad(format!("Embedding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::KnowledgeLoad(format!(
                "Embedding request returned {status}: {body}"
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::KnowledgeLoad(format!("Invalid embedding response: {e}")))?;

        if parsed.data.len() != texts.len() {
            return Err(AppError::KnowledgeLoad(format!(
                "Embedding count mismatch: sent {} texts, got {} embeddings",
                texts.len(),
                parsed.data.len()
            )));
        }

        // Restore request order; providers may return entries out of order.
        let mut data = parsed.data;
        data.sort_by_key(|d| d.index);

        Ok(data
            .into_iter()
            .map(|d| normalize(d.embedding))
            .collect())
    }
}

/// Unit-normalize a vector so cosine similarity reduces to a dot product.
fn normalize(mut v: Vec<f32>) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut v {
            *x /= norm;
        }
    }
    v
}
