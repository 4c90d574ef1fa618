//! OpenAI provider implementation for reqcollector
//!
//! Talks to an OpenAI-compatible Chat Completions endpoint. Credentials are
//! checked when the provider is built so a missing key fails before any
//! session exists.

use crate::config::OpenAiConfig;
use crate::error::{Result, ReqCollectorError};
use crate::providers::{CompletionResponse, Message, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI chat completions provider
///
/// # Examples
///
/// ```no_run
/// use reqcollector::config::OpenAiConfig;
/// use reqcollector::providers::{Message, OpenAiProvider, Provider};
///
/// # async fn example() -> reqcollector::error::Result<()> {
/// let config = OpenAiConfig {
///     api_key: Some("sk-...".to_string()),
///     ..Default::default()
/// };
/// let provider = OpenAiProvider::new(config)?;
/// let completion = provider.complete(&[Message::user("Hello!")]).await?;
/// println!("{}", completion.message.content);
/// # Ok(())
/// # }
/// ```
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
    api_key: String,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_base", &self.config.api_base)
            .field("model", &self.config.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Request structure for the chat completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

/// Response structure from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider instance
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` if no API key is configured, or a provider
    /// error if the HTTP client cannot be built
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::config::OpenAiConfig;
    /// use reqcollector::providers::OpenAiProvider;
    ///
    /// let result = OpenAiProvider::new(OpenAiConfig::default());
    /// assert!(result.is_err());
    /// ```
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ReqCollectorError::MissingCredentials(
                    "openai (set OPENAI_API_KEY or provider.openai.api_key)".to_string(),
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("reqcollector/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ReqCollectorError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized OpenAI provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        let url = self.completions_url();
        let request = ChatRequest {
            model: &self.config.model,
            messages,
        };

        tracing::debug!("Sending OpenAI request: {} messages", messages.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI request failed: {}", e);
                ReqCollectorError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI returned error {}: {}", status, error_text);
            return Err(ReqCollectorError::Provider(format!(
                "OpenAI returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            ReqCollectorError::Provider(format!("Failed to parse OpenAI response: {}", e))
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| {
                ReqCollectorError::Provider("OpenAI response contained no choices".to_string())
            })?
            .message
            .content
            .ok_or_else(|| {
                ReqCollectorError::Provider("OpenAI response message had no content".to_string())
            })?;

        let message = Message::assistant(content);
        let response = match chat_response.usage {
            Some(usage) => {
                tracing::debug!(
                    "OpenAI response: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens,
                    usage.completion_tokens
                );
                CompletionResponse::with_usage(
                    message,
                    TokenUsage::new(usage.prompt_tokens, usage.completion_tokens),
                )
            }
            None => CompletionResponse::new(message),
        };

        Ok(response)
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn get_current_model(&self) -> Result<String> {
        Ok(self.config.model.clone())
    }
}
