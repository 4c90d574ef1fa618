//! Test utilities for reqcollector
//!
//! This module provides a scripted completion provider, a temporary
//! directory helper and assertion helpers shared by the unit tests.

use crate::error::{ReqCollectorError, Result};
use crate::providers::{CompletionResponse, Message, Provider, TokenUsage};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// Provider that replays canned replies or always fails
///
/// Records the transcript length it was called with, so tests can check
/// what the session sent.
pub struct ScriptedProvider {
    replies: Vec<String>,
    fail: bool,
    usage: Option<TokenUsage>,
    delay: Option<Duration>,
    seen: Mutex<Vec<usize>>,
}

impl ScriptedProvider {
    /// Provider returning `replies` in order, then failing
    pub fn replies(replies: Vec<&str>) -> Self {
        Self {
            replies: replies.into_iter().map(str::to_string).collect(),
            fail: false,
            usage: None,
            delay: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Provider whose every call fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::replies(vec![])
        }
    }

    /// Report the given token usage with every reply
    pub fn with_usage(mut self, prompt_tokens: usize, completion_tokens: usize) -> Self {
        self.usage = Some(TokenUsage::new(prompt_tokens, completion_tokens));
        self
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Transcript lengths received, one per call
    pub fn seen_lengths(&self) -> Vec<usize> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        let index = {
            let mut seen = self.seen.lock().unwrap();
            seen.push(messages.len());
            seen.len() - 1
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail {
            return Err(ReqCollectorError::Provider("scripted failure".to_string()).into());
        }

        let reply = self.replies.get(index).ok_or_else(|| {
            ReqCollectorError::Provider("no more scripted replies".to_string())
        })?;

        let message = Message::assistant(reply.clone());
        Ok(match self.usage {
            Some(usage) => CompletionResponse::with_usage(message, usage),
            None => CompletionResponse::new(message),
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn get_current_model(&self) -> Result<String> {
        Ok("scripted-model".to_string())
    }
}

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Assert that an error's message contains the expected text
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_provider_replays_then_fails() {
        let provider = ScriptedProvider::replies(vec!["one"]);
        let first = provider.complete(&[Message::user("a")]).await.unwrap();
        assert_eq!(first.message.content, "one");
        assert!(provider.complete(&[Message::user("b")]).await.is_err());
        assert_eq!(provider.seen_lengths(), vec![1, 1]);
    }

    #[tokio::test]
    async fn test_failing_provider() {
        let provider = ScriptedProvider::failing();
        assert_error_contains(provider.complete(&[]).await, "scripted failure");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<()> = Ok(());
        assert_error_contains(result, "error");
    }
}
