//! Configuration management for reqcollector
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, ReqCollectorError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported provider type names
pub const VALID_PROVIDERS: [&str; 2] = ["openai", "ollama"];

/// Default file name of the exported requirements document
pub const DEFAULT_EXPORT_PATH: &str = "requirements_summary.json";

/// Main configuration structure for reqcollector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration (OpenAI, Ollama)
    pub provider: ProviderConfig,
    /// Session behavior configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Provider configuration
///
/// Specifies which completion provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type")]
    pub provider_type: String,

    /// OpenAI-compatible chat completions configuration
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
}

/// OpenAI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Model identifier sent with every request
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Base URL of the chat completions API
    ///
    /// Pointing this at a mock server is how the provider is tested.
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,

    /// API key; usually supplied through `OPENAI_API_KEY` instead
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: default_openai_model(),
            api_base: default_openai_api_base(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model to use for Ollama
    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Session behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where `/confirm` writes the exported document when no path is given
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

fn default_export_path() -> String {
    DEFAULT_EXPORT_PATH.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
        }
    }
}

/// Overrides taken from the command line, applied after env vars
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Provider type override
    pub provider: Option<String>,
    /// Model override for the selected provider
    pub model: Option<String>,
    /// Export path override
    pub output: Option<String>,
}

impl Config {
    /// Load configuration from file, environment and CLI overrides
    ///
    /// A missing file is not an error: defaults are used and a warning is logged.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `overrides` - Values from the command line, applied last
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, overrides: &CliOverrides) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default_config()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(overrides);

        Ok(config)
    }

    fn default_config() -> Self {
        Self {
            provider: ProviderConfig {
                provider_type: "openai".to_string(),
                openai: OpenAiConfig::default(),
                ollama: OllamaConfig::default(),
            },
            session: SessionConfig::default(),
        }
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ReqCollectorError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ReqCollectorError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("REQCOLLECTOR_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            if !api_key.trim().is_empty() {
                self.provider.openai.api_key = Some(api_key);
            }
        }

        if let Ok(model) = std::env::var("REQCOLLECTOR_OPENAI_MODEL") {
            self.provider.openai.model = model;
        }

        if let Ok(api_base) = std::env::var("REQCOLLECTOR_OPENAI_API_BASE") {
            self.provider.openai.api_base = api_base;
        }

        if let Ok(host) = std::env::var("REQCOLLECTOR_OLLAMA_HOST") {
            self.provider.ollama.host = host;
        }

        if let Ok(model) = std::env::var("REQCOLLECTOR_OLLAMA_MODEL") {
            self.provider.ollama.model = model;
        }

        if let Ok(timeout) = std::env::var("REQCOLLECTOR_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.openai.timeout_seconds = value;
                self.provider.ollama.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid REQCOLLECTOR_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(export_path) = std::env::var("REQCOLLECTOR_EXPORT_PATH") {
            tracing::debug!(export_path = %export_path, "Env override: REQCOLLECTOR_EXPORT_PATH");
            self.session.export_path = export_path;
        }
    }

    fn apply_cli_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(provider) = &overrides.provider {
            self.provider.provider_type = provider.clone();
        }

        // The model override targets whichever provider ends up selected
        if let Some(model) = &overrides.model {
            match self.provider.provider_type.as_str() {
                "ollama" => self.provider.ollama.model = model.clone(),
                _ => self.provider.openai.model = model.clone(),
            }
        }

        if let Some(output) = &overrides.output {
            self.session.export_path = output.clone();
        }
    }

    /// Validate the configuration
    ///
    /// Credentials are not checked here; the provider does that when it is
    /// constructed so that `schema` works without a key.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(
                ReqCollectorError::Config("Provider type cannot be empty".to_string()).into(),
            );
        }

        if !VALID_PROVIDERS.contains(&self.provider.provider_type.as_str()) {
            return Err(ReqCollectorError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                VALID_PROVIDERS.join(", ")
            ))
            .into());
        }

        if self.provider.openai.model.trim().is_empty() {
            return Err(
                ReqCollectorError::Config("openai.model cannot be empty".to_string()).into(),
            );
        }

        if self.provider.ollama.model.trim().is_empty() {
            return Err(
                ReqCollectorError::Config("ollama.model cannot be empty".to_string()).into(),
            );
        }

        if self.provider.openai.timeout_seconds == 0 || self.provider.ollama.timeout_seconds == 0 {
            return Err(ReqCollectorError::Config(
                "timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        url::Url::parse(&self.provider.openai.api_base).map_err(|e| {
            ReqCollectorError::Config(format!(
                "Invalid openai.api_base '{}': {}",
                self.provider.openai.api_base, e
            ))
        })?;

        url::Url::parse(&self.provider.ollama.host).map_err(|e| {
            ReqCollectorError::Config(format!(
                "Invalid ollama.host '{}': {}",
                self.provider.ollama.host, e
            ))
        })?;

        if self.session.export_path.trim().is_empty() {
            return Err(ReqCollectorError::Config(
                "session.export_path cannot be empty".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
