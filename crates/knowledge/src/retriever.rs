//! Maximal marginal relevance retrieval over the vector index.
//!
//! Fetches a relevance-ordered candidate pool, then iteratively selects
//! chunks that balance similarity to the query against redundancy with the
//! chunks already picked. Guideline corpora repeat the same thresholds
//! across documents; pure top-k would return six near-copies of one
//! paragraph.

use std::sync::Arc;

use pedisafe_core::{AppError, AppResult};

use crate::embeddings::EmbeddingProvider;
use crate::index::{cosine_similarity, ScoredChunk, VectorIndex};
use crate::types::Chunk;

/// Retrieval tuning knobs.
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Number of chunks returned to the prompt composer
    pub k: usize,

    /// Size of the candidate pool fetched before diversification
    pub fetch_k: usize,

    /// Relevance weight: 1.0 is pure similarity, 0.0 pure diversity
    pub lambda: f32,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            k: 6,
            fetch_k: 20,
            lambda: 0.7,
        }
    }
}

/// Retriever bound to one index and the embedder that built it.
pub struct Retriever {
    index: VectorIndex,
    embedder: Arc<dyn EmbeddingProvider>,
    config: RetrieverConfig,
}

impl Retriever {
    /// Bind a retriever to an index. The embedder must be the same one
    /// that produced the index embeddings.
    pub fn new(
        index: VectorIndex,
        embedder: Arc<dyn EmbeddingProvider>,
        config: RetrieverConfig,
    ) -> AppResult<Self> {
        if index.fingerprint() != embedder.fingerprint() {
            return Err(AppError::ProviderMismatch {
                index: index.fingerprint().to_string(),
                query: embedder.fingerprint(),
            });
        }
        Ok(Self {
            index,
            embedder,
            config,
        })
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// Retrieve up to `k` chunks for a caregiver message.
    ///
    /// Returns fewer than `k` when the index is small; an empty result is
    /// valid and means the composer gets no context fragments.
    pub async fn retrieve(&self, query: &str) -> AppResult<Vec<Chunk>> {
        let query_embedding = self.embedder.embed(query).await?;
        let candidates = self.index.search(&query_embedding, self.config.fetch_k)?;

        let selected = mmr_select(candidates, self.config.k, self.config.lambda);

        tracing::debug!(
            query_len = query.len(),
            selected = selected.len(),
            "Retrieved context chunks"
        );

        Ok(selected)
    }
}

/// Maximal marginal relevance selection.
///
/// Candidates arrive sorted by query similarity descending. The first pick
/// is always the most relevant candidate; each following pick maximizes
/// `lambda * sim(query, c) - (1 - lambda) * max sim(c, selected)`. Ties go
/// to the candidate with the better original relevance rank, keeping the
/// output deterministic.
fn mmr_select(candidates: Vec<ScoredChunk>, k: usize, lambda: f32) -> Vec<Chunk> {
    let mut remaining: Vec<ScoredChunk> = candidates;
    let mut selected: Vec<ScoredChunk> = Vec::new();

    while selected.len() < k && !remaining.is_empty() {
        let mut best_idx = 0;
        let mut best_score = f32::NEG_INFINITY;

        for (i, candidate) in remaining.iter().enumerate() {
            let max_redundancy = selected
                .iter()
                .map(|s| cosine_similarity(&candidate.embedding, &s.embedding))
                .fold(f32::NEG_INFINITY, f32::max);
            let redundancy = if selected.is_empty() {
                0.0
            } else {
                max_redundancy
            };

            let score = lambda * candidate.similarity - (1.0 - lambda) * redundancy;
            // Strict > keeps the earlier (better-ranked) candidate on ties.
            if score > best_score {
                best_score = score;
                best_idx = i;
            }
        }

        selected.push(remaining.remove(best_idx));
    }

    selected.into_iter().map(|s| s.chunk).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::TrigramProvider;
    use std::path::PathBuf;

    fn scored(text: &str, position: u32, embedding: Vec<f32>, similarity: f32) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk {
                text: text.to_string(),
                source_path: PathBuf::from("unified_fever_guidelines.md"),
                position,
            },
            embedding,
            similarity,
        }
    }

    #[test]
    fn test_mmr_first_pick_is_most_relevant() {
        let candidates = vec![
            scored("top", 0, vec![1.0, 0.0], 0.9),
            scored("second", 1, vec![0.9, 0.1], 0.8),
        ];
        let picked = mmr_select(candidates, 2, 0.7);
        assert_eq!(picked[0].text, "top");
    }

    #[test]
    fn test_mmr_prefers_diverse_over_redundant() {
        // "dup" is nearly identical to "top"; "other" is less relevant but
        // orthogonal. With lambda 0.7 the diverse chunk wins second place.
        let candidates = vec![
            scored("top", 0, vec![1.0, 0.0], 0.90),
            scored("dup", 1, vec![0.999, 0.04], 0.89),
            scored("other", 2, vec![0.0, 1.0], 0.70),
        ];
        let picked = mmr_select(candidates, 2, 0.7);
        assert_eq!(picked[0].text, "top");
        assert_eq!(picked[1].text, "other");
    }

    #[test]
    fn test_mmr_pure_relevance_when_lambda_one() {
        let candidates = vec![
            scored("top", 0, vec![1.0, 0.0], 0.90),
            scored("dup", 1, vec![0.999, 0.04], 0.89),
            scored("other", 2, vec![0.0, 1.0], 0.70),
        ];
        let picked = mmr_select(candidates, 2, 1.0);
        assert_eq!(picked[1].text, "dup");
    }

    #[test]
    fn test_mmr_returns_at_most_k_without_duplicates() {
        let candidates: Vec<ScoredChunk> = (0..10)
            .map(|i| {
                scored(
                    &format!("c{i}"),
                    i,
                    vec![1.0 - i as f32 * 0.05, i as f32 * 0.05],
                    1.0 - i as f32 * 0.05,
                )
            })
            .collect();
        let picked = mmr_select(candidates, 4, 0.7);
        assert_eq!(picked.len(), 4);
        let mut texts: Vec<&str> = picked.iter().map(|c| c.text.as_str()).collect();
        texts.dedup();
        assert_eq!(texts.len(), 4);
    }

    #[test]
    fn test_mmr_small_pool_returns_everything() {
        let candidates = vec![scored("only", 0, vec![1.0, 0.0], 0.5)];
        let picked = mmr_select(candidates, 6, 0.7);
        assert_eq!(picked.len(), 1);
    }

    #[test]
    fn test_retriever_rejects_fingerprint_mismatch() {
        let index = VectorIndex::new("openai/text-embedding-3-small", 1536);
        let embedder = Arc::new(TrigramProvider::new(384));
        let result = Retriever::new(index, embedder, RetrieverConfig::default());
        assert!(matches!(result, Err(AppError::ProviderMismatch { .. })));
    }

    #[tokio::test]
    async fn test_retriever_end_to_end_with_trigram() {
        let embedder = Arc::new(TrigramProvider::new(384));
        let mut index = VectorIndex::new(embedder.fingerprint(), 384);

        let texts = [
            "Fever in infants under three months requires urgent assessment",
            "Hydration matters more than food during febrile illness",
            "Rash with purple spots alongside fever is an emergency",
        ];
        for (i, text) in texts.iter().enumerate() {
            let embedding = embedder.embed(text).await.unwrap();
            index
                .insert(
                    Chunk {
                        text: text.to_string(),
                        source_path: PathBuf::from("nhs_fever_children.md"),
                        position: i as u32,
                    },
                    embedding,
                )
                .unwrap();
        }

        let retriever = Retriever::new(index, embedder, RetrieverConfig::default()).unwrap();
        let chunks = retriever
            .retrieve("my infant has a fever, is it urgent?")
            .await
            .unwrap();

        assert!(!chunks.is_empty());
        assert!(chunks.len() <= 6);
    }

    #[tokio::test]
    async fn test_retrieve_is_deterministic_for_fixed_index_and_query() {
        let embedder = Arc::new(TrigramProvider::new(384));
        let mut index = VectorIndex::new(embedder.fingerprint(), 384);

        let texts = [
            "Fever in infants under three months requires urgent assessment",
            "Hydration matters more than food during febrile illness",
            "Rash with purple spots alongside fever is an emergency",
            "Most fevers in older children resolve with rest at home",
            "A stiff neck with fever needs emergency evaluation",
        ];
        for (i, text) in texts.iter().enumerate() {
            let embedding = embedder.embed(text).await.unwrap();
            index
                .insert(
                    Chunk {
                        text: text.to_string(),
                        source_path: PathBuf::from("unified_fever_guidelines.md"),
                        position: i as u32,
                    },
                    embedding,
                )
                .unwrap();
        }

        let retriever = Retriever::new(index, embedder, RetrieverConfig::default()).unwrap();
        let query = "newborn fever, should I go to the emergency room?";
        let first = retriever.retrieve(query).await.unwrap();
        let second = retriever.retrieve(query).await.unwrap();

        assert!(!first.is_empty());
        let first_order: Vec<(&str, u32)> = first
            .iter()
            .map(|c| (c.text.as_str(), c.position))
            .collect();
        let second_order: Vec<(&str, u32)> = second
            .iter()
            .map(|c| (c.text.as_str(), c.position))
            .collect();
        assert_eq!(first_order, second_order);
    }
}
