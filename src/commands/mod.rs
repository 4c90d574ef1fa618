/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat`   - Interactive requirements gathering session
- `schema` - Print the empty export document

These handlers stay small and delegate to the library components:
providers, the session state manager, and configuration.
*/

use crate::commands::special_commands::{
    parse_special_command, print_fields, print_help, SpecialCommand,
};
use crate::config::Config;
use crate::error::{Result, ReqCollectorError};
use crate::providers::create_provider;
use crate::session::{RequirementsRecord, Session, SessionSnapshot};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// Special commands parser for the interactive session
pub mod special_commands;

/// Write an exported snapshot to `path`, creating parent directories
///
/// # Errors
///
/// Returns `ReqCollectorError::Export` if the directory or file cannot be written
pub fn write_export(path: &Path, json: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ReqCollectorError::Export(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }

    std::fs::write(path, json)
        .map_err(|e| ReqCollectorError::Export(format!("cannot write {}: {}", path.display(), e)))?;

    tracing::info!("Wrote requirements export to {}", path.display());
    Ok(path.to_path_buf())
}

// Chat command handler
pub mod chat {
    //! Interactive requirements session handler.
    //!
    //! Instantiates the configured provider, creates a `Session`, and runs a
    //! readline-based loop that submits user input to the session and
    //! dispatches special `/` commands.

    use super::*;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start an interactive requirements session
    ///
    /// The provider is constructed before any session state exists, so a
    /// missing API key fails here without creating a session.
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed), CLI overrides already applied
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be created or the terminal
    /// cannot be initialized
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::commands::chat;
    /// use reqcollector::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default()).await?;
    /// ```
    pub async fn run_chat(config: Config) -> Result<()> {
        let provider = create_provider(&config.provider.provider_type, &config.provider)?;
        let mut session = Session::new(Arc::from(provider));
        let export_path = config.session.export_path.clone();

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&session, &export_path);

        loop {
            let prompt = format!("{} ", "[requirements]>>".cyan().bold());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    rl.add_history_entry(trimmed)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::None => {
                            let reply = session.submit_user_reply(trimmed).await;
                            println!("\n{}\n", reply);
                        }
                        SpecialCommand::Exit => break,
                        other => handle_special_command(&mut session, other, &export_path),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Execute one special command against the session
    ///
    /// Failures are printed for the user; none of them end the session.
    fn handle_special_command(session: &mut Session, command: SpecialCommand, export_path: &str) {
        match command {
            SpecialCommand::Help => print_help(),
            SpecialCommand::ShowStatus => print_status_display(session),
            SpecialCommand::ShowRequirements => {
                println!("\n{}\n", session.requirements().render_listing());
            }
            SpecialCommand::ShowReply => match session.last_reply() {
                Some(reply) => println!("\n{}\n", reply),
                None => println!("{}\n", "No reply yet.".yellow()),
            },
            SpecialCommand::ListFields => print_fields(),
            SpecialCommand::Set { field, value } => match session.record_value(field, &value) {
                Ok(()) => println!(
                    "{} {}\n",
                    "Recorded".green(),
                    session.requirements().render_value(field)
                ),
                Err(e) => eprintln!("{}\n", e.to_string().red()),
            },
            SpecialCommand::Confirm(path) => {
                let target = path.as_deref().unwrap_or(export_path);
                match confirm_to_file(session, Path::new(target)) {
                    Ok(written) => println!(
                        "{} {}\n",
                        "Requirements confirmed and saved to".green(),
                        written.display()
                    ),
                    Err(e) => match e.downcast_ref::<ReqCollectorError>() {
                        Some(ReqCollectorError::Precondition(_)) => println!(
                            "{}\n",
                            "Nothing to confirm yet. Answer at least one question first.".yellow()
                        ),
                        _ => eprintln!("{}\n", e.to_string().red()),
                    },
                }
            }
            SpecialCommand::Exit | SpecialCommand::None => {}
        }
    }

    /// Confirm the last reply and write the resulting snapshot to `path`
    ///
    /// # Errors
    ///
    /// Returns `Precondition` if no reply exists yet, or `Export` if the
    /// file cannot be written
    pub fn confirm_to_file(session: &mut Session, path: &Path) -> Result<PathBuf> {
        let json = session.confirm_and_export()?;
        write_export(path, &json)
    }

    /// Display welcome banner at the start of the session
    fn print_welcome_banner(session: &Session, export_path: &str) {
        let model = session
            .provider()
            .get_current_model()
            .unwrap_or_else(|_| "unknown".to_string());

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║          reqcollector Requirements Session - Welcome!        ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "Provider: {} ({})",
            session.provider().name().cyan(),
            model
        );
        println!("Export:   {}\n", export_path);
        println!("Describe your project and answer the analyst's questions.");
        println!("Type '/help' for available commands, '/confirm' to save, 'exit' to quit\n");
    }

    /// Display detailed status information about the current session
    ///
    /// This is called when the user types '/status'.
    fn print_status_display(session: &Session) {
        let model = session
            .provider()
            .get_current_model()
            .unwrap_or_else(|_| "unknown".to_string());
        let usage = session.usage();

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                  reqcollector Session Status                 ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Phase:             {}", session.phase().to_string().cyan());
        println!("Provider:          {} ({})", session.provider().name(), model);
        println!(
            "Started:           {}",
            session.started_at().format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!("Conversation Size: {} messages", session.transcript().len());
        println!(
            "Token Usage:       {} prompt / {} completion",
            usage.prompt_tokens, usage.completion_tokens
        );
        println!("Exports:           {}", session.export_count());
        println!();
    }

}

// Schema command handler
pub mod schema {
    //! Prints the layout of the export document.

    use super::*;

    /// JSON of an empty snapshot: the template record and an empty summary
    pub fn empty_document() -> Result<String> {
        SessionSnapshot::capture(&RequirementsRecord::empty(), "").to_json()
    }

    /// Print the empty export document to stdout
    pub fn print_schema() -> Result<()> {
        println!("{}", empty_document()?);
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::temp_dir;

    #[test]
    fn test_write_export_creates_parent_dirs() {
        let dir = temp_dir();
        let path = dir.path().join("a").join("b").join("out.json");
        let written = write_export(&path, "{}").unwrap();
        assert_eq!(std::fs::read_to_string(written).unwrap(), "{}");
    }

    #[test]
    fn test_write_export_into_file_parent_fails() {
        let dir = temp_dir();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let err = write_export(&blocker.join("out.json"), "{}").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReqCollectorError>(),
            Some(ReqCollectorError::Export(_))
        ));
    }
}
