//! Configuration components, one per concern.

pub mod chat;
pub mod embedding;
pub mod ingest;
pub mod qa;
pub mod store;

pub use chat::{ChatConfig, ChatProviderType};
pub use embedding::{EmbeddingConfig, EmbeddingProviderType};
pub use ingest::IngestConfig;
pub use qa::QaConfig;
pub use store::StoreConfig;
