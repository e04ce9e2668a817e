//! OpenAI-compatible chat provider.
//!
//! Speaks the `/chat/completions` dialect with bearer auth, which covers
//! OpenAI itself, Groq, and most self-hosted gateways.

use crate::chat::{ChatMessage, ChatProvider};
use crate::error::{LlmError, LlmResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub struct OpenAiChatProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl OpenAiChatProvider {
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        temperature: f32,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            model,
            temperature,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiChatProvider {
    async fn chat(&self, messages: &[ChatMessage]) -> LlmResult<String> {
        let body = serde_json::json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": messages.iter().map(|m| {
                serde_json::json!({
                    "role": m.role.as_str(),
                    "content": m.content,
                })
            }).collect::<Vec<_>>(),
        });

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
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
                "chat API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: ChatCompletionsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("failed to parse response: {}", e)))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::invalid_response("no choices in response"))?;

        Ok(choice.message.content.unwrap_or_default())
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Response shape shared by OpenAI-compatible services.
#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_for(server: &mockito::Server) -> OpenAiChatProvider {
        OpenAiChatProvider::new(
            "sk-test".to_string(),
            server.url(),
            "test-model".to_string(),
            0.0,
            30,
        )
    }

    #[tokio::test]
    async fn chat_returns_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"the answer"}}]}"#)
            .create_async()
            .await;

        let provider = provider_for(&server);
        let reply = provider.chat(&[ChatMessage::user("question")]).await.unwrap();

        assert_eq!(reply, "the answer");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_maps_to_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":"bad key"}"#)
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider.chat(&[ChatMessage::user("q")]).await.unwrap_err();

        assert!(matches!(err, LlmError::Http(_)), "got {:?}", err);
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn empty_choices_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider.chat(&[ChatMessage::user("q")]).await.unwrap_err();

        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }
}
