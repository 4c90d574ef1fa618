//! Special commands parser for the interactive requirements session
//!
//! This module parses special commands that can be entered during an
//! interactive session instead of a reply to the analyst. Special commands
//! allow users to inspect the gathered requirements, record values by hand,
//! confirm and export the result, and leave the session.
//!
//! Commands are prefixed with `/` and are case-insensitive. Arguments keep
//! their original case.

use crate::session::RequirementField;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/fields' to see valid field names")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during an interactive session
///
/// These commands act on the local session state rather than being sent to
/// the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Display help information
    Help,

    /// Display session phase, transcript size, model and start time
    ShowStatus,

    /// Display the rendered requirements listing
    ShowRequirements,

    /// Display the most recent reply
    ShowReply,

    /// Display the names of all requirement fields
    ListFields,

    /// Record a value in the requirements record
    ///
    /// Single-value fields are set once; list fields get the value appended.
    Set {
        /// Field to update
        field: RequirementField,
        /// Value to record
        value: String,
    },

    /// Confirm the last reply as final summary and write the export
    ///
    /// The optional path overrides the configured export path for this
    /// export only.
    Confirm(Option<String>),

    /// Exit the interactive session
    Exit,

    /// Not a special command; the input is a reply for the analyst
    None,
}

/// Parse user input into a special command
///
/// # Arguments
///
/// * `input` - Raw line entered by the user
///
/// # Returns
///
/// Returns the parsed command, `SpecialCommand::None` for plain text, or a
/// `CommandError` for malformed `/` commands
///
/// # Examples
///
/// ```
/// use reqcollector::commands::special_commands::{parse_special_command, SpecialCommand};
/// use reqcollector::session::RequirementField;
///
/// let cmd = parse_special_command("/set target_platform iOS").unwrap();
/// assert_eq!(
///     cmd,
///     SpecialCommand::Set {
///         field: RequirementField::TargetPlatform,
///         value: "iOS".to_string()
///     }
/// );
///
/// let cmd = parse_special_command("We need a booking app").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // If input doesn't start with "/", it's not a command (except exit/quit)
    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    // A leading word like "/api/v1" is a path in a reply, not a command
    if name.len() > 1 && name[1..].contains('/') {
        return Ok(SpecialCommand::None);
    }

    match name.as_str() {
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/requirements" | "/reqs" => Ok(SpecialCommand::ShowRequirements),
        "/reply" | "/last" => Ok(SpecialCommand::ShowReply),
        "/fields" => Ok(SpecialCommand::ListFields),
        "/set" => parse_set(rest),
        "/confirm" | "/export" => {
            let path = (!rest.is_empty()).then(|| rest.to_string());
            Ok(SpecialCommand::Confirm(path))
        }
        "/exit" | "/quit" | "exit" | "quit" => Ok(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

fn parse_set(args: &str) -> Result<SpecialCommand, CommandError> {
    let missing = || CommandError::MissingArgument {
        command: "/set".to_string(),
        usage: "/set <field> <value>".to_string(),
    };

    let (field_name, value) = args.split_once(char::is_whitespace).ok_or_else(missing)?;
    let value = value.trim();
    if value.is_empty() {
        return Err(missing());
    }

    let field = field_name
        .parse::<RequirementField>()
        .map_err(|_| CommandError::UnsupportedArgument {
            command: "/set".to_string(),
            arg: field_name.to_string(),
        })?;

    Ok(SpecialCommand::Set {
        field,
        value: value.to_string(),
    })
}

/// Display help text for special commands
///
/// # Examples
///
/// ```
/// use reqcollector::commands::special_commands::print_help;
///
/// print_help();
/// ```
pub fn print_help() {
    println!(
        r#"
Special Commands for Requirements Sessions
==========================================

INSPECTING THE SESSION:
  /status               - Show session phase, transcript size and model
  /requirements         - Show the gathered requirements
  /reqs                 - Same as /requirements
  /reply                - Show the analyst's most recent reply
  /fields               - List requirement field names

RECORDING REQUIREMENTS:
  /set <field> <value>  - Record a value (single-value fields are set once,
                          list fields get the value appended)

FINISHING:
  /confirm [path]       - Freeze the last reply as the final summary and
                          write the JSON export (default path from config)
  /export [path]        - Same as /confirm

SESSION CONTROL:
  /help                 - Show this help message
  /?                    - Same as /help
  exit                  - Exit the session (also /exit, quit, Ctrl-D)

NOTES:
  - Commands are case-insensitive
  - Regular text (not starting with /) is sent to the analyst
  - Text starting with a path such as /api/v1 is also sent to the analyst;
    any other unknown /word is reported as an unknown command
  - /confirm needs at least one reply from the analyst first
"#
    );
}

/// Display the requirement field names with their kind
pub fn print_fields() {
    use crate::session::FieldKind;
    use colored::Colorize;

    println!();
    for field in RequirementField::ALL {
        let kind = match field.kind() {
            FieldKind::Scalar => "single value",
            FieldKind::List => "list",
        };
        println!("  {:<28} {}", field.key().cyan(), kind);
    }
    println!();
}
