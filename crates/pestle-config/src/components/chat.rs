//! Chat model service settings.

use serde::{Deserialize, Serialize};

/// Which chat backend to talk to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatProviderType {
    /// Local Ollama server.
    #[default]
    Ollama,
    /// Any OpenAI-compatible chat-completions endpoint (OpenAI, Groq, ...).
    OpenAI,
}

/// Settings for the chat model used for query generation and answer
/// synthesis. Unset fields fall back to provider-specific defaults via the
/// accessor methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    #[serde(default)]
    pub provider: ChatProviderType,
    /// Service base URL, e.g. `http://localhost:11434` or
    /// `https://api.groq.com/openai/v1`.
    pub endpoint: Option<String>,
    pub model: Option<String>,
    /// API key for OpenAI-compatible services. Falls back to the
    /// `OPENAI_API_KEY` environment variable when unset.
    pub api_key: Option<String>,
    /// Sampling temperature. Query generation wants this low.
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

impl ChatConfig {
    /// Service base URL, with the provider default when unset.
    pub fn endpoint(&self) -> String {
        self.endpoint.clone().unwrap_or_else(|| match self.provider {
            ChatProviderType::Ollama => "http://localhost:11434".to_string(),
            ChatProviderType::OpenAI => "https://api.openai.com/v1".to_string(),
        })
    }

    /// Model name, with the provider default when unset.
    pub fn model(&self) -> String {
        self.model.clone().unwrap_or_else(|| match self.provider {
            ChatProviderType::Ollama => "llama3.2".to_string(),
            ChatProviderType::OpenAI => "llama-3.3-70b-versatile".to_string(),
        })
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(0.0)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(120)
    }
}
