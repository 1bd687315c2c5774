//! PediSafe Knowledge Library
//!
//! Everything between guideline markdown on disk and ranked context
//! chunks for the prompt composer:
//! - Document loading and source attribution
//! - Recursive character splitting
//! - Embedding providers (remote OpenAI, local trigram fallback)
//! - In-memory vector index and MMR retrieval

pub mod embeddings;
pub mod index;
pub mod retriever;
pub mod sources;
pub mod splitter;
pub mod store;
pub mod types;

pub use embeddings::{create_provider, EmbeddingProvider, TrigramProvider};
pub use index::{cosine_similarity, ScoredChunk, VectorIndex};
pub use retriever::{Retriever, RetrieverConfig};
pub use sources::{citation, Citation};
pub use splitter::RecursiveSplitter;
pub use store::{build_index, list_sources, load_documents, KnowledgeBase};
pub use types::{BuildStats, Chunk, Document};
