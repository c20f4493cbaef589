//! Local character-trigram embeddings.

use crate::embeddings::provider::EmbeddingProvider;
use ragassist_core::AppResult;
use std::collections::HashMap;

const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to", "of",
    "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had",
    "it", "its", "their", "they", "them", "what", "how", "does", "why",
];

/// Hashed bag-of-trigrams embedder for offline operation.
///
/// Vectors are deterministic and unit length. Texts sharing words or word
/// fragments land close together, which is enough for lexical retrieval
/// without a model download.
#[derive(Debug)]
pub struct TrigramProvider {
    model: String,
    dimensions: usize,
}

impl TrigramProvider {
    /// `model` only labels the vectors; the hashing scheme is the same for
    /// every name.
    pub fn new(model: impl Into<String>, dimensions: usize) -> Self {
        Self {
            model: model.into(),
            dimensions,
        }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return embedding;
        }

        let lower = text.to_lowercase();
        let mut word_freq: HashMap<&str, u32> = HashMap::new();
        for word in lower
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(w))
        {
            *word_freq.entry(word).or_insert(0) += 1;
        }

        for (word, freq) in &word_freq {
            let chars: Vec<char> = word.chars().collect();
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                let idx = hash_bytes(trigram.as_bytes(), 37) % self.dimensions;
                embedding[idx] += (*freq as f32).sqrt();
            }

            let idx = hash_bytes(word.as_bytes(), 31) % self.dimensions;
            embedding[idx] += *freq as f32;
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            embedding.iter_mut().for_each(|v| *v /= norm);
        }

        embedding
    }
}

fn hash_bytes(bytes: &[u8], multiplier: u64) -> usize {
    bytes
        .iter()
        .fold(0u64, |acc, &b| acc.wrapping_mul(multiplier).wrapping_add(b as u64)) as usize
}

#[async_trait::async_trait]
impl EmbeddingProvider for TrigramProvider {
    fn provider_name(&self) -> &str {
        "trigram"
    }

    fn model_name(&self) -> &str {
        &self.model
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

    fn norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[tokio::test]
    async fn test_unit_length() {
        let provider = TrigramProvider::new("trigram-v1", 384);
        let embedding = provider.embed("Supervised learning uses labels").await.unwrap();

        assert_eq!(embedding.len(), 384);
        assert!((norm(&embedding) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_reports_configured_model() {
        let provider = TrigramProvider::new("trigram-v2", 128);
        assert_eq!(provider.model_name(), "trigram-v2");
        assert_eq!(provider.dimensions(), 128);
    }

    #[tokio::test]
    async fn test_deterministic() {
        let provider = TrigramProvider::new("trigram-v1", 384);
        let a = provider.embed("deterministic test").await.unwrap();
        let b = provider.embed("deterministic test").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_related_texts_are_closer() {
        let provider = TrigramProvider::new("trigram-v1", 384);
        let query = provider.embed("What is kubernetes?").await.unwrap();
        let related = provider
            .embed("Kubernetes orchestrates containers across nodes.")
            .await
            .unwrap();
        let unrelated = provider
            .embed("Pandas dataframes hold tabular data.")
            .await
            .unwrap();

        assert!(dot(&query, &related) > dot(&query, &unrelated));
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let provider = TrigramProvider::new("trigram-v1", 384);
        let embedding = provider.embed("").await.unwrap();
        assert!(embedding.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn test_utf8_safety() {
        let provider = TrigramProvider::new("trigram-v1", 64);
        let embedding = provider
            .embed("Análise de dados 🎮 com estatística")
            .await
            .unwrap();
        assert!((norm(&embedding) - 1.0).abs() < 0.001);
    }
}
