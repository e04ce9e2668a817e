//! Embedding provider implementations.

pub mod ollama;
pub mod openai;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use ollama::OllamaEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockEmbeddingProvider;

use crate::chat::resolve_api_key;
use crate::error::{LlmError, LlmResult};
use async_trait::async_trait;
use pestle_config::{EmbeddingConfig, EmbeddingProviderType};
use std::sync::Arc;

/// A text embedding backend: texts in, one vector per text out, in order.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts. The result has one vector per input, in input
    /// order; a shorter result means the provider dropped some inputs.
    async fn embed_batch(&self, texts: &[String]) -> LlmResult<Vec<Vec<f32>>>;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> LlmResult<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| LlmError::invalid_response("provider returned no embedding"))
    }

    /// Model name for logs.
    fn model_name(&self) -> &str;

    /// Provider name for logs.
    fn provider_name(&self) -> &str;
}

/// Create an embedding provider from configuration.
pub fn create_embedding_provider(
    config: &EmbeddingConfig,
) -> LlmResult<Arc<dyn EmbeddingProvider>> {
    match config.provider {
        EmbeddingProviderType::Ollama => {
            let provider = OllamaEmbeddingProvider::new(
                config.endpoint.clone(),
                config.model.clone(),
                config.timeout_secs,
            );
            Ok(Arc::new(provider))
        }
        EmbeddingProviderType::OpenAI => {
            let api_key = resolve_api_key(config.api_key.as_deref())?;
            let provider = OpenAiEmbeddingProvider::new(
                api_key,
                config.endpoint.clone(),
                config.model.clone(),
                config.timeout_secs,
            );
            Ok(Arc::new(provider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ollama_factory_needs_no_key() {
        let config = EmbeddingConfig::default();
        let provider = create_embedding_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "ollama");
        assert_eq!(provider.model_name(), "all-minilm");
    }
}
