//! PediSafe LLM Library
//!
//! Text generation plumbing: the `LlmClient` trait, the OpenAI-compatible
//! HTTP client shared by both supported providers, and provider error
//! classification.

pub mod client;
pub mod error_map;
pub mod factory;
pub mod providers;

pub use client::{LlmClient, LlmRequest, LlmResponse};
pub use factory::create_client;
pub use providers::openai_compat::OpenAiCompatClient;
