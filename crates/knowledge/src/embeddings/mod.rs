//! Embedding generation for knowledge chunks and queries.

pub mod provider;
pub mod providers;

pub use provider::{create_provider, EmbeddingProvider};
pub use providers::openai::OpenAiEmbeddingProvider;
pub use providers::trigram::TrigramProvider;
