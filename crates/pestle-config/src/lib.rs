//! Configuration for the pestle workspace.
//!
//! Settings layer in the usual order: compiled defaults, then an optional
//! TOML file (`pestle.toml` in the working directory, or an explicit path),
//! then environment variables prefixed `PESTLE` with `__` separating levels,
//! e.g. `PESTLE_STORE__ENDPOINT=ws://localhost:8000`.

mod components;
mod error;

pub use components::{
    ChatConfig, ChatProviderType, EmbeddingConfig, EmbeddingProviderType, IngestConfig, QaConfig,
    StoreConfig,
};
pub use error::{ConfigError, ConfigResult};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PestleConfig {
    pub store: StoreConfig,
    pub chat: ChatConfig,
    pub embedding: EmbeddingConfig,
    pub ingest: IngestConfig,
    pub qa: QaConfig,
}

impl PestleConfig {
    /// Load configuration from the standard layers. A missing file is fine
    /// unless an explicit path was given.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name("pestle").required(false)),
        };

        builder = builder.add_source(
            config::Environment::with_prefix("PESTLE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_any_file() {
        let config = PestleConfig::default();
        assert_eq!(config.store.endpoint, "mem://");
        assert_eq!(config.chat.provider, ChatProviderType::Ollama);
        assert_eq!(config.embedding.batch_size, 64);
        assert_eq!(config.qa.top_k, 10);
    }

    #[test]
    fn load_from_explicit_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[store]
endpoint = "ws://db.internal:8000"
namespace = "prod"

[chat]
provider = "openai"
model = "llama-3.3-70b-versatile"

[ingest]
chunk_size = 500
"#
        )
        .unwrap();

        let config = PestleConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.store.endpoint, "ws://db.internal:8000");
        assert_eq!(config.store.namespace, "prod");
        assert_eq!(config.store.database, "drugs");
        assert_eq!(config.chat.provider, ChatProviderType::OpenAI);
        assert_eq!(config.chat.model(), "llama-3.3-70b-versatile");
        assert_eq!(config.ingest.chunk_size, 500);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = PestleConfig::load(Some(Path::new("/nonexistent/pestle.toml")));
        assert!(result.is_err());
    }
}
