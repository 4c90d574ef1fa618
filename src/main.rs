//! reqcollector - Conversational requirements gathering CLI
//!
#![doc = "Main entry point for the reqcollector application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reqcollector::cli::{Cli, Commands};
use reqcollector::commands;
use reqcollector::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli.overrides())?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Chat { .. } => {
            tracing::info!(
                "Starting requirements session with provider {}",
                config.provider.provider_type
            );
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Schema => {
            commands::schema::print_schema()?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins when set; otherwise `--verbose` raises the crate level to debug.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "reqcollector=debug"
    } else {
        "reqcollector=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
