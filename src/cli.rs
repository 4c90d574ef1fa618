//! Command-line interface definition for reqcollector
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the interactive chat and for printing the
//! export document schema.

use crate::config::CliOverrides;
use clap::{Parser, Subcommand};

/// reqcollector - Conversational requirements gathering CLI
///
/// Chat with a completion service that asks targeted questions about a
/// software project, then export the gathered requirements as JSON.
#[derive(Parser, Debug, Clone)]
#[command(name = "reqcollector")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for reqcollector
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive requirements gathering session
    Chat {
        /// Override the provider from config (openai, ollama)
        #[arg(short, long)]
        provider: Option<String>,

        /// Override the model of the selected provider
        #[arg(short, long)]
        model: Option<String>,

        /// Path the confirmed requirements are written to
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print an empty export document showing the snapshot layout
    Schema,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Configuration overrides carried by the selected command
    pub fn overrides(&self) -> CliOverrides {
        match &self.command {
            Commands::Chat {
                provider,
                model,
                output,
            } => CliOverrides {
                provider: provider.clone(),
                model: model.clone(),
                output: output.clone(),
            },
            Commands::Schema => CliOverrides::default(),
        }
    }
}
