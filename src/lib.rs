//! reqcollector - Conversational requirements gathering library
//!
//! This library drives a conversation between a user and a chat completion
//! service to gather software project requirements, and exports what was
//! gathered as a JSON snapshot.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Requirements record, transcript, session state manager and registry
//! - `providers`: Completion service abstraction and implementations (OpenAI, Ollama)
//! - `prompts`: Fixed system instruction and the rendered-state prompt
//! - `commands`: Interactive chat loop and other CLI command handlers
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use reqcollector::{providers, Config, Session};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = providers::create_provider(&config.provider.provider_type, &config.provider)?;
//!     let mut session = Session::new(Arc::from(provider));
//!     println!("{}", session.submit_user_reply("We need a booking app").await);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{ReqCollectorError, Result};
pub use session::{RequirementField, RequirementsRecord, Session, SessionRegistry, SessionSnapshot};

#[cfg(test)]
pub mod test_utils;
