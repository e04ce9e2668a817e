//! Embedding model service settings.

use serde::{Deserialize, Serialize};

/// Which embedding backend to talk to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderType {
    /// Local Ollama server.
    #[default]
    Ollama,
    /// Any OpenAI-compatible embeddings endpoint.
    OpenAI,
}

/// Settings for the embedding model. The model must produce vectors of the
/// fixed contract dimensionality (384); that value is not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub provider: EmbeddingProviderType,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// API key for OpenAI-compatible services. Falls back to the
    /// `OPENAI_API_KEY` environment variable when unset.
    pub api_key: Option<String>,
    /// Names sent per provider call during annotation.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "all-minilm".to_string()
}

fn default_batch_size() -> usize {
    64
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderType::default(),
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmbeddingConfig {
    /// Batch size clamped to at least one name per call.
    pub fn batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}
