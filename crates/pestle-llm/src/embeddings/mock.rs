//! Mock embedding provider for tests.
//!
//! Produces deterministic unit vectors derived from the input text, so the
//! same name always embeds identically across runs and processes.

use crate::embeddings::EmbeddingProvider;
use crate::error::LlmResult;
use async_trait::async_trait;

pub struct MockEmbeddingProvider {
    dimensions: usize,
}

impl MockEmbeddingProvider {
    /// 384 dimensions, matching the graph's vector index contract.
    pub fn new() -> Self {
        Self { dimensions: 384 }
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Deterministic unit vector for a text.
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut state = text
            .bytes()
            .fold(0x9e37_79b9u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));

        let mut vector: Vec<f32> = (0..self.dimensions)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                ((state >> 8) as f32 / (1u32 << 24) as f32) - 0.5
            })
            .collect();

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> LlmResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn model_name(&self) -> &str {
        "mock-embedding"
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
