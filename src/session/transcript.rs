//! Append-only conversation transcript
//!
//! Entry 0 is the system instruction. Everything after it is appended in
//! chronological order; nothing is ever reordered, rewritten or pruned.

use crate::providers::{Message, Role};

/// Ordered log of role-tagged messages exchanged with the completion service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates a transcript holding exactly the system instruction
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::providers::Role;
    /// use reqcollector::session::Transcript;
    ///
    /// let transcript = Transcript::new("You are an analyst");
    /// assert_eq!(transcript.len(), 1);
    /// assert_eq!(transcript.system().role, Role::System);
    /// ```
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Appends a user message
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Appends an assistant message
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// The fixed system entry
    pub fn system(&self) -> &Message {
        &self.messages[0]
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of entries including the system instruction
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the system entry is present from construction
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of entries with the given role
    pub fn count_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
