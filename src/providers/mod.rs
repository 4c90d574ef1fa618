//! Provider module for reqcollector
//!
//! This module contains the completion service abstraction and its
//! implementations for OpenAI-compatible APIs and Ollama.

pub mod base;
pub mod ollama;
pub mod openai;

pub use base::{CompletionOutcome, CompletionResponse, Message, Provider, Role, TokenUsage};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use crate::config::ProviderConfig;
use crate::error::{Result, ReqCollectorError};

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `provider_type` - Type of provider ("openai" or "ollama")
/// * `config` - Provider configuration
///
/// # Errors
///
/// Returns error if the provider type is unknown or the provider cannot be
/// constructed (for OpenAI this includes a missing API key)
///
/// # Examples
///
/// ```
/// use reqcollector::config::{OllamaConfig, OpenAiConfig, ProviderConfig};
/// use reqcollector::providers::create_provider;
///
/// let config = ProviderConfig {
///     provider_type: "ollama".to_string(),
///     openai: OpenAiConfig::default(),
///     ollama: OllamaConfig::default(),
/// };
/// let provider = create_provider("ollama", &config).unwrap();
/// assert_eq!(provider.name(), "ollama");
/// ```
pub fn create_provider(provider_type: &str, config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match provider_type {
        "openai" => Ok(Box::new(OpenAiProvider::new(config.openai.clone())?)),
        "ollama" => Ok(Box::new(OllamaProvider::new(config.ollama.clone())?)),
        _ => Err(ReqCollectorError::Provider(format!(
            "Unknown provider type: {}",
            provider_type
        ))
        .into()),
    }
}
