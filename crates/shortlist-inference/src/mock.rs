//! Mock generation backend for deterministic testing.
//!
//! Returns a scripted reply (or failure) and records every call, so tests
//! can assert both the selection outcome and how many generation calls the
//! pipeline made.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use shortlist_core::{Error, GenerationBackend, Result};

/// Mock generation backend with a scripted reply and a call log.
#[derive(Clone)]
pub struct MockGenerationBackend {
    reply: Arc<Mutex<std::result::Result<String, String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockGenerationBackend {
    /// Create a mock returning an empty reply.
    pub fn new() -> Self {
        Self {
            reply: Arc::new(Mutex::new(Ok(String::new()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script a fixed reply for all generate calls.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        *self.reply.lock().unwrap() = Ok(reply.into());
        self
    }

    /// Script a failure for all generate calls.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.reply.lock().unwrap() = Err(message.into());
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of generate calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_system("", prompt).await
    }

    async fn generate_with_system(&self, _system: &str, prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(prompt.to_string());
        match &*self.reply.lock().unwrap() {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(Error::Inference(message.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "mock-judge"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls_and_replies() {
        let mock = MockGenerationBackend::new().with_reply("[1]");
        assert_eq!(mock.generate("rank").await.unwrap(), "[1]");
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.prompts(), vec!["rank".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_scripted_failure() {
        let mock = MockGenerationBackend::new().with_failure("unavailable");
        let err = mock.generate("rank").await.unwrap_err();
        assert!(err.to_string().contains("unavailable"));
        assert_eq!(mock.call_count(), 1);
    }
}
