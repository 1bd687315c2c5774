//! Local trigram embedding provider.

use crate::embeddings::provider::EmbeddingProvider;
use pedisafe_core::AppResult;
use std::collections::HashMap;

/// English and Spanish stop words, since caregiver messages and the
/// guideline corpus arrive in both languages.
const STOP_WORDS: [&str; 46] = [
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to", "of",
    "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had",
    "it", "its", "their", "they", "them", "el", "la", "los", "las", "un", "una", "de", "del",
    "que", "con", "por", "para", "es", "tiene",
];

/// Trigram-based embedding provider for local, offline operation.
///
/// Hashes character trigrams and whole words into a fixed-size vector.
/// Not semantically accurate like a neural model, but deterministic and
/// content-dependent, which is enough to rank guideline chunks when the
/// active provider exposes no embedding endpoint.
#[derive(Debug)]
pub struct TrigramProvider {
    dimensions: usize,
}

impl TrigramProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        let lower = text.to_lowercase();
        let mut frequencies: HashMap<&str, u32> = HashMap::new();
        for word in lower.split_whitespace() {
            if word.len() > 2 && !STOP_WORDS.contains(&word) {
                *frequencies.entry(word).or_insert(0) += 1;
            }
        }

        for (word, count) in &frequencies {
            let chars: Vec<char> = word.chars().collect();
            // Trigram contributions use sqrt scaling so a repeated word
            // does not dominate the whole vector.
            let trigram_weight = (*count as f32).sqrt();
            for window in chars.windows(3) {
                let dim = self.hash_to_dim(window.iter().collect::<String>().as_bytes(), 37);
                vector[dim] += trigram_weight;
            }
            // One dimension per whole word, weighted by raw frequency.
            let dim = self.hash_to_dim(word.as_bytes(), 31);
            vector[dim] += *count as f32;
        }

        normalize(&mut vector);
        vector
    }

    fn hash_to_dim(&self, bytes: &[u8], multiplier: u64) -> usize {
        let hash = bytes.iter().fold(0u64, |acc, &b| {
            acc.wrapping_mul(multiplier).wrapping_add(u64::from(b))
        });
        (hash as usize) % self.dimensions
    }
}

fn normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for TrigramProvider {
    fn provider_name(&self) -> &str {
        "trigram"
    }

    fn model_name(&self) -> &str {
        "trigram-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm_of(vector: &[f32]) -> f32 {
        vector.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    #[tokio::test]
    async fn test_trigram_provider_identity() {
        let provider = TrigramProvider::new(384);
        assert_eq!(provider.dimensions(), 384);
        assert_eq!(provider.provider_name(), "trigram");
        assert_eq!(provider.model_name(), "trigram-v1");
        assert_eq!(provider.fingerprint(), "trigram/trigram-v1");
    }

    #[tokio::test]
    async fn test_trigram_provider_embed_single() {
        let provider = TrigramProvider::new(384);
        let embedding = provider.embed("my baby has a fever").await.unwrap();

        assert_eq!(embedding.len(), 384);
        assert!((norm_of(&embedding) - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_trigram_provider_embed_batch() {
        let provider = TrigramProvider::new(384);
        let texts = vec![
            "fever in newborns".to_string(),
            "when to call the pediatrician".to_string(),
            "hydration and rest".to_string(),
        ];

        let embeddings = provider.embed_batch(&texts).await.unwrap();

        assert_eq!(embeddings.len(), 3);
        for embedding in &embeddings {
            assert_eq!(embedding.len(), 384);
            assert!((norm_of(embedding) - 1.0).abs() < 0.001);
        }
    }

    #[tokio::test]
    async fn test_trigram_provider_deterministic() {
        let provider = TrigramProvider::new(384);
        let text = "temperature of 39 degrees";

        let first = provider.embed(text).await.unwrap();
        let second = provider.embed(text).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_trigram_provider_different_texts() {
        let provider = TrigramProvider::new(384);

        let first = provider.embed("fever threshold").await.unwrap();
        let second = provider.embed("breathing difficulty").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_trigram_provider_empty_text() {
        let provider = TrigramProvider::new(384);
        let embedding = provider.embed("").await.unwrap();

        assert_eq!(embedding.len(), 384);
        // Empty text produces the zero vector
        assert!(embedding.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn test_trigram_provider_spanish_text() {
        let provider = TrigramProvider::new(384);

        let text = "mi bebé tiene fiebre de 38.5 grados y está irritable";
        let embedding = provider.embed(text).await.unwrap();

        assert_eq!(embedding.len(), 384);
        assert!((norm_of(&embedding) - 1.0).abs() < 0.001);
    }
}
