//! OpenAI-compatible chat completion client.
//!
//! Both supported backends (OpenAI itself and Cerebras) speak the same
//! `/chat/completions` wire format, so one client parameterized by base URL
//! and model covers them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use pedisafe_core::{AppError, AppResult, GenerationErrorKind};

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use crate::error_map;

pub struct OpenAiCompatClient {
    client: reqwest::Client,
    provider_name: String,
    base_url: String,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for OpenAiCompatClient {
    // api_key stays out of Debug output so it can never leak into logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatClient")
            .field("provider_name", &self.provider_name)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    model: Option<String>,
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OpenAiCompatClient {
    pub fn new(
        provider_name: &str,
        base_url: &str,
        model: &str,
        api_key: &str,
        timeout_secs: u64,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                AppError::generation(
                    GenerationErrorKind::Other,
                    format!("Failed to build HTTP client: {e}"),
                )
            })?;

        Ok(Self {
            client,
            provider_name: provider_name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiCompatClient {
    fn provider_name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(
            provider = %self.provider_name,
            model = %self.model,
            "Requesting completion"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let kind = if e.is_timeout() {
                    GenerationErrorKind::Timeout
                } else {
                    error_map::classify(&e.to_string())
                };
                AppError::generation(kind, format!("Completion request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::generation(
                error_map::classify(&body),
                format!("Provider returned {status}: {body}"),
            ));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            AppError::generation(
                GenerationErrorKind::Other,
                format!("Invalid completion response: {e}"),
            )
        })?;

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            AppError::generation(
                GenerationErrorKind::Other,
                "Provider returned no choices".to_string(),
            )
        })?;

        Ok(LlmResponse {
            content: choice.message.content,
            model: parsed.model.unwrap_or_else(|| self.model.clone()),
        })
    }
}
