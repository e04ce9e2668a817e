//! Ollama chat provider.

use crate::chat::{ChatMessage, ChatProvider};
use crate::error::{LlmError, LlmResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub struct OllamaChatProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl OllamaChatProvider {
    pub fn new(base_url: String, model: String, temperature: f32, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            model,
            temperature,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl ChatProvider for OllamaChatProvider {
    async fn chat(&self, messages: &[ChatMessage]) -> LlmResult<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages.iter().map(|m| {
                serde_json::json!({
                    "role": m.role.as_str(),
                    "content": m.content,
                })
            }).collect::<Vec<_>>(),
            "stream": false,
            "options": {
                "temperature": self.temperature,
            },
        });

        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(LlmError::Http(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("failed to parse response: {}", e)))?;

        Ok(parsed.message.content)
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaChatMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaChatMessage {
    content: String,
}
