//! Prompts sent to the completion service
//!
//! The system instruction opens every transcript; the next-question
//! instruction closes the state listing appended on each user turn.

/// Fixed system instruction placed at transcript entry 0
pub const SYSTEM_PROMPT: &str = "\
You are a professional software analyst helping clients define complete and clear software project requirements.
Your job is to collect:
- Functional requirements (what the system should do)
- Non-functional requirements (performance, scalability, security, etc)
- Preferred tech stack (languages, frameworks)
- Target platform (web, mobile, desktop, etc)
- Any constraints or preferences (budget, time, legal, etc)

At the end, analyze the project and suggest a suitable tech stack based on the gathered information.
Ask questions until you are confident that the requirements are complete. Then summarize the requirements and tech stack recommendation, and ask the client to confirm.";

/// Header placed above the rendered requirements listing
pub const STATE_HEADER: &str = "Current gathered info:";

/// Instruction appended after the rendered requirements listing
pub const NEXT_QUESTION_INSTRUCTION: &str =
    "What should you ask next to complete the requirements collection?";

/// Wrap a rendered requirements listing into the per-turn grounding prompt
///
/// # Examples
///
/// ```
/// use reqcollector::prompts::build_state_prompt;
///
/// let prompt = build_state_prompt("project_name: None");
/// assert!(prompt.starts_with("Current gathered info:\nproject_name: None"));
/// assert!(prompt.ends_with("complete the requirements collection?"));
/// ```
pub fn build_state_prompt(listing: &str) -> String {
    format!(
        "{}\n{}\n\n{}",
        STATE_HEADER, listing, NEXT_QUESTION_INSTRUCTION
    )
}
