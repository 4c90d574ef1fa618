//! Base provider trait and common types for reqcollector
//!
//! This module defines the Provider trait that every completion service must
//! implement, along with the role-tagged message type and the response and
//! outcome structures exchanged with the session.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Fixed instructions for the model
    System,
    /// Text entered by the user or generated on the user's behalf
    User,
    /// Model output
    Assistant,
}

impl Role {
    /// Wire name of the role, as used by chat completion APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message structure for conversation
///
/// Represents one role-tagged entry exchanged with the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::providers::{Message, Role};
    ///
    /// let msg = Message::user("We need a mobile app");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::providers::{Message, Role};
    ///
    /// let msg = Message::assistant("Which platform?");
    /// assert_eq!(msg.role, Role::Assistant);
    /// ```
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Creates a new system message
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::providers::{Message, Role};
    ///
    /// let msg = Message::system("You are a software analyst");
    /// assert_eq!(msg.role, Role::System);
    /// ```
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Token usage information from a completion
///
/// Tracks the number of tokens used in prompts and completions,
/// as reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// Counts come from the server unchecked, so the total saturates
    /// instead of overflowing.
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// Completion response with message and optional token usage
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The response message from the model
    pub message: Message,
    /// Optional token usage information
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a new CompletionResponse
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::providers::{CompletionResponse, Message};
    ///
    /// let response = CompletionResponse::new(Message::assistant("Hello!"));
    /// assert!(response.usage.is_none());
    /// ```
    pub fn new(message: Message) -> Self {
        Self {
            message,
            usage: None,
        }
    }

    /// Create a new CompletionResponse with token usage
    pub fn with_usage(message: Message, usage: TokenUsage) -> Self {
        Self {
            message,
            usage: Some(usage),
        }
    }
}

/// Terminal outcome of one completion request, as seen by a session
///
/// Every failure kind (transport, authentication, malformed response)
/// collapses into `Failed`; the session decides what to show for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The provider produced reply text
    Reply(String),
    /// The provider failed; the payload describes why
    Failed(String),
}

impl CompletionOutcome {
    /// Collapse a provider result into an outcome
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::providers::{CompletionOutcome, CompletionResponse, Message};
    ///
    /// let ok = CompletionOutcome::from_result(Ok(CompletionResponse::new(Message::assistant("hi"))));
    /// assert_eq!(ok, CompletionOutcome::Reply("hi".to_string()));
    ///
    /// let failed = CompletionOutcome::from_result(Err(anyhow::anyhow!("boom")));
    /// assert!(matches!(failed, CompletionOutcome::Failed(_)));
    /// ```
    pub fn from_result(result: Result<CompletionResponse>) -> Self {
        match result {
            Ok(response) => Self::Reply(response.message.content),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    /// Returns true if the provider failed
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Completion service contract
///
/// A provider receives the full ordered transcript on every call and
/// returns a single assistant message. Providers hold no per-session state.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Completes a conversation with the given messages
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response is invalid
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse>;

    /// Short name of the provider ("openai", "ollama", ...)
    fn name(&self) -> &str;

    /// Get the name of the currently active model
    ///
    /// # Default Implementation
    ///
    /// The default implementation reports that the model is unknown.
    fn get_current_model(&self) -> Result<String> {
        Err(crate::error::ReqCollectorError::Provider(
            "Current model information is not available from this provider".to_string(),
        )
        .into())
    }
}
