//! Chat provider implementations.

pub mod ollama;
pub mod openai;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use ollama::OllamaChatProvider;
pub use openai::OpenAiChatProvider;

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockChatProvider;

use crate::error::{LlmError, LlmResult};
use async_trait::async_trait;
use pestle_config::{ChatConfig, ChatProviderType};
use std::sync::Arc;

/// Author role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One message in a chat exchange.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A chat-completion backend: one conversation in, one assistant reply out.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the conversation and return the assistant reply text.
    async fn chat(&self, messages: &[ChatMessage]) -> LlmResult<String>;

    /// Provider name for logs.
    fn provider_name(&self) -> &str;

    /// Model this provider targets.
    fn model(&self) -> &str;
}

/// Create a chat provider from configuration.
pub fn create_chat_provider(config: &ChatConfig) -> LlmResult<Arc<dyn ChatProvider>> {
    match config.provider {
        ChatProviderType::Ollama => {
            let provider = OllamaChatProvider::new(
                config.endpoint(),
                config.model(),
                config.temperature(),
                config.timeout_secs(),
            );
            Ok(Arc::new(provider))
        }
        ChatProviderType::OpenAI => {
            let api_key = resolve_api_key(config.api_key.as_deref())?;
            let provider = OpenAiChatProvider::new(
                api_key,
                config.endpoint(),
                config.model(),
                config.temperature(),
                config.timeout_secs(),
            );
            Ok(Arc::new(provider))
        }
    }
}

/// Configured key first, `OPENAI_API_KEY` as the fallback.
pub(crate) fn resolve_api_key(configured: Option<&str>) -> LlmResult<String> {
    if let Some(key) = configured {
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }
    std::env::var("OPENAI_API_KEY").map_err(|_| {
        LlmError::config("api_key not configured and OPENAI_API_KEY not set")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors_set_roles() {
        assert_eq!(ChatMessage::system("a").role, ChatRole::System);
        assert_eq!(ChatMessage::user("b").role, ChatRole::User);
        assert_eq!(ChatMessage::assistant("c").role, ChatRole::Assistant);
    }

    #[test]
    fn configured_api_key_wins() {
        let key = resolve_api_key(Some("sk-configured")).unwrap();
        assert_eq!(key, "sk-configured");
    }

    #[test]
    fn empty_api_key_is_not_a_key() {
        // May still resolve via the environment, but never to empty.
        if let Ok(key) = resolve_api_key(Some("")) {
            assert!(!key.is_empty());
        }
    }

    #[test]
    fn ollama_factory_needs_no_key() {
        let config = ChatConfig::default();
        let provider = create_chat_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "ollama");
        assert_eq!(provider.model(), "llama3.2");
    }
}
