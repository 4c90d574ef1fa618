//! Session state manager
//!
//! A [`Session`] exclusively owns one requirements record, one transcript
//! and the last-reply/final-summary pair. All mutation goes through
//! `&mut self`, so a session can only ever be driven by one flow at a time.

use crate::error::{Result, ReqCollectorError};
use crate::prompts;
use crate::providers::{CompletionOutcome, Provider, TokenUsage};
use crate::session::{FieldKind, RequirementField, RequirementsRecord, SessionSnapshot, Transcript};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Reply recorded when the completion service fails
pub const FAILURE_PLACEHOLDER: &str = "⚠️ The model failed to respond.";

/// Observable lifecycle position of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Fresh state; no exchange has happened yet
    Initialized,
    /// At least one exchange produced a reply (real or placeholder)
    HasReply,
    /// At least one export has frozen a final summary
    Finalized,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized => write!(f, "initialized"),
            Self::HasReply => write!(f, "has reply"),
            Self::Finalized => write!(f, "finalized"),
        }
    }
}

/// Session-scoped requirements gathering state
///
/// # Examples
///
/// ```no_run
/// use reqcollector::config::OllamaConfig;
/// use reqcollector::providers::OllamaProvider;
/// use reqcollector::session::Session;
/// use std::sync::Arc;
///
/// # async fn example() -> reqcollector::error::Result<()> {
/// let provider = Arc::new(OllamaProvider::new(OllamaConfig::default())?);
/// let mut session = Session::new(provider);
/// let reply = session.submit_user_reply("We need a mobile app").await;
/// println!("{}", reply);
/// let json = session.confirm_and_export()?;
/// # Ok(())
/// # }
/// ```
pub struct Session {
    provider: Arc<dyn Provider>,
    requirements: RequirementsRecord,
    transcript: Transcript,
    last_reply: Option<String>,
    final_summary: String,
    export_count: usize,
    usage: TokenUsage,
    started_at: DateTime<Utc>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("provider", &self.provider.name())
            .field("phase", &self.phase())
            .field("transcript_len", &self.transcript.len())
            .field("started_at", &self.started_at)
            .finish()
    }
}

impl Session {
    /// Creates an initialized session
    ///
    /// The record comes from the empty factory, the transcript holds only
    /// the system instruction, and the final summary is empty.
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        tracing::debug!("Initializing session with provider {}", provider.name());
        Self {
            provider,
            requirements: RequirementsRecord::empty(),
            transcript: Transcript::new(prompts::SYSTEM_PROMPT),
            last_reply: None,
            final_summary: String::new(),
            export_count: 0,
            usage: TokenUsage::default(),
            started_at: Utc::now(),
        }
    }

    /// Renders the current record plus the next-question instruction
    ///
    /// Pure: reads the record, changes nothing.
    pub fn build_next_prompt(&self) -> String {
        prompts::build_state_prompt(&self.requirements.render_listing())
    }

    /// Runs one exchange with the completion service
    ///
    /// Appends, in order, the user's text, the rendered-state prompt (also
    /// as a `user` entry), and the assistant reply. A failed completion is
    /// logged and replaced by [`FAILURE_PLACEHOLDER`]; this method never
    /// fails and always grows the transcript by exactly three entries.
    ///
    /// Returns the reply that was recorded as the last reply.
    pub async fn submit_user_reply(&mut self, text: impl Into<String>) -> &str {
        self.transcript.push_user(text);
        let state_prompt = self.build_next_prompt();
        self.transcript.push_user(state_prompt);

        let reply = match self.request_completion().await {
            CompletionOutcome::Reply(reply) => reply,
            CompletionOutcome::Failed(reason) => {
                tracing::error!(
                    provider = self.provider.name(),
                    "Completion failed, recording placeholder reply: {}",
                    reason
                );
                FAILURE_PLACEHOLDER.to_string()
            }
        };

        self.transcript.push_assistant(reply.clone());
        self.last_reply.insert(reply).as_str()
    }

    async fn request_completion(&mut self) -> CompletionOutcome {
        tracing::debug!(
            "Requesting completion with {} transcript entries",
            self.transcript.len()
        );
        let result = self.provider.complete(self.transcript.messages()).await;
        if let Ok(response) = &result {
            if let Some(usage) = response.usage {
                self.usage = TokenUsage::new(
                    self.usage.prompt_tokens.saturating_add(usage.prompt_tokens),
                    self.usage.completion_tokens.saturating_add(usage.completion_tokens),
                );
            }
        }
        CompletionOutcome::from_result(result)
    }

    /// Freezes the last reply as the final summary and serializes a snapshot
    ///
    /// Performs no I/O; persisting the returned text is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` if no exchange has happened yet; the final
    /// summary is left untouched in that case
    pub fn confirm_and_export(&mut self) -> Result<String> {
        let summary = self.last_reply.clone().ok_or_else(|| {
            ReqCollectorError::Precondition(
                "nothing to confirm yet; send at least one message first".to_string(),
            )
        })?;

        let json = SessionSnapshot::capture(&self.requirements, &summary).to_json()?;
        self.final_summary = summary;
        self.export_count += 1;
        tracing::info!(
            "Exported requirements snapshot ({} bytes, export #{})",
            json.len(),
            self.export_count
        );
        Ok(json)
    }

    /// Snapshot of the record and the current final summary, without freezing anything
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.requirements, &self.final_summary)
    }

    /// Records a value in the requirements record
    ///
    /// Scalar fields are set (only while absent); list fields get the value
    /// appended.
    ///
    /// # Errors
    ///
    /// Returns a record error if the update would break the record's
    /// monotonic invariants
    pub fn record_value(&mut self, field: RequirementField, value: &str) -> Result<()> {
        match field.kind() {
            FieldKind::Scalar => self.requirements.set(field, value)?,
            FieldKind::List => self.requirements.append(field, value)?,
        }
        tracing::debug!("Recorded value for {}", field);
        Ok(())
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        if self.export_count > 0 {
            SessionPhase::Finalized
        } else if self.last_reply.is_some() {
            SessionPhase::HasReply
        } else {
            SessionPhase::Initialized
        }
    }

    /// The live requirements record
    pub fn requirements(&self) -> &RequirementsRecord {
        &self.requirements
    }

    /// The live transcript
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Most recent reply, if any exchange has happened
    pub fn last_reply(&self) -> Option<&str> {
        self.last_reply.as_deref()
    }

    /// Summary frozen by the most recent export (empty before the first)
    pub fn final_summary(&self) -> &str {
        &self.final_summary
    }

    /// Number of successful exports
    pub fn export_count(&self) -> usize {
        self.export_count
    }

    /// Token usage accumulated over all successful completions
    pub fn usage(&self) -> TokenUsage {
        self.usage
    }

    /// When the session was created
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Provider driving this session
    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }
}
