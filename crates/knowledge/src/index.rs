//! In-memory vector index over knowledge chunks.
//!
//! Built once at session start and immutable afterwards. Every entry stores
//! the chunk alongside its unit-normalized embedding, and the index carries
//! the fingerprint of the provider that produced those embeddings so a
//! mismatched query embedder is caught before any similarity is computed.

use pedisafe_core::{AppError, AppResult};

use crate::types::Chunk;

/// One indexed chunk with its embedding.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

/// A scored search hit, similarity in descending order.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
    pub similarity: f32,
}

/// Immutable in-memory vector index.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    /// "provider/model" of the embedder that built this index
    fingerprint: String,
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    pub fn new(fingerprint: impl Into<String>, dimensions: usize) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            dimensions,
            entries: Vec::new(),
        }
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a chunk with its embedding. Dimension mismatches are
    /// programmer errors surfaced immediately.
    pub fn insert(&mut self, chunk: Chunk, embedding: Vec<f32>) -> AppResult<()> {
        if embedding.len() != self.dimensions {
            return Err(AppError::KnowledgeLoad(format!(
                "Embedding dimension mismatch: index expects {}, got {}",
                self.dimensions,
                embedding.len()
            )));
        }
        self.entries.push(IndexEntry { chunk, embedding });
        Ok(())
    }

    /// Exhaustive cosine search over all entries.
    ///
    /// Results are sorted by similarity descending with a stable sort, so
    /// ties keep insertion (document) order and the ranking is
    /// deterministic for a fixed index and query.
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<ScoredChunk>> {
        if query_embedding.len() != self.dimensions {
            return Err(AppError::KnowledgeLoad(format!(
                "Query embedding dimension mismatch: index expects {}, got {}",
                self.dimensions,
                query_embedding.len()
            )));
        }

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                embedding: entry.embedding.clone(),
                similarity: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);

        Ok(scored)
    }
}

/// Cosine similarity between two vectors. Zero-magnitude vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
