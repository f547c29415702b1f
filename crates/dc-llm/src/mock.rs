//! Scripted chat model for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{LlmError, LlmResult};
use crate::model::{ChatMessage, ChatModel, CompletionOptions};

/// One recorded `complete` call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

/// Mock chat model with scripted replies and request recording.
pub struct MockChatModel {
    /// Queued replies returned by `complete` (FIFO order).
    replies: Mutex<Vec<LlmResult<String>>>,
    /// All requests passed to `complete` (for test assertions).
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockChatModel {
    /// Create a new mock with no queued replies.
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock pre-loaded with successful replies.
    pub fn with_replies(replies: &[&str]) -> Self {
        let mock = Self::new();
        for reply in replies {
            mock.queue_reply(*reply);
        }
        mock
    }

    /// Queue a successful reply.
    pub fn queue_reply(&self, raw: impl Into<String>) {
        self.replies.lock().unwrap().push(Ok(raw.into()));
    }

    /// Queue a failure.
    pub fn queue_error(&self, err: LlmError) {
        self.replies.lock().unwrap().push(Err(err));
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> LlmResult<String> {
        self.requests.lock().unwrap().push(RecordedRequest {
            messages: messages.to_vec(),
            temperature: options.temperature,
        });

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(LlmError::InvalidResponse(
                "no scripted reply queued".into(),
            ));
        }
        replies.remove(0)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
