//! Model service clients for pestle.
//!
//! Two narrow seams: [`ChatProvider`] (a conversation in, one assistant
//! reply out) used for query generation and answer synthesis, and
//! [`EmbeddingProvider`] (texts in, vectors out) used by the embedding
//! annotator and for question embeddings. Both have Ollama and
//! OpenAI-compatible implementations selected from configuration, plus
//! deterministic mocks behind the `test-utils` feature.

pub mod chat;
pub mod embeddings;
pub mod error;

pub use chat::{create_chat_provider, ChatMessage, ChatProvider, ChatRole};
pub use embeddings::{create_embedding_provider, EmbeddingProvider};
pub use error::{LlmError, LlmResult};

#[cfg(any(test, feature = "test-utils"))]
pub use chat::MockChatProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use embeddings::MockEmbeddingProvider;
