//! Mock chat provider for tests.
//!
//! Returns scripted replies in order, falling back to a default, and records
//! every conversation it receives for verification.

use crate::chat::{ChatMessage, ChatProvider};
use crate::error::LlmResult;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub struct MockChatProvider {
    replies: Arc<Mutex<VecDeque<String>>>,
    default_reply: String,
    calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl MockChatProvider {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            default_reply: "mock reply".to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script a sequence of replies, consumed one per `chat` call.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        {
            let mut queue = provider.replies.lock().unwrap();
            queue.extend(replies.into_iter().map(Into::into));
        }
        provider
    }

    /// Append one scripted reply. Interior mutability, so `&self` suffices.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(reply.into());
    }

    /// Every conversation received so far.
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `chat` calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockChatProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn chat(&self, messages: &[ChatMessage]) -> LlmResult<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone());
        Ok(reply)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-chat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_replies_come_back_in_order() {
        let provider = MockChatProvider::with_replies(["first", "second"]);

        assert_eq!(
            provider.chat(&[ChatMessage::user("a")]).await.unwrap(),
            "first"
        );
        assert_eq!(
            provider.chat(&[ChatMessage::user("b")]).await.unwrap(),
            "second"
        );
        // Queue exhausted, default takes over.
        assert_eq!(
            provider.chat(&[ChatMessage::user("c")]).await.unwrap(),
            "mock reply"
        );
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let provider = MockChatProvider::new();
        let _ = provider
            .chat(&[ChatMessage::system("s"), ChatMessage::user("u")])
            .await;

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 2);
        assert_eq!(calls[0][1].content, "u");
    }
}
