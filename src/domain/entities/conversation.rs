use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Answer;

/// Message history of one session.
///
/// Starts with a single empty system message and only ever grows, one
/// user/assistant pair per successful turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            messages: vec![Message::new(MessageRole::System, "")],
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends the user query and its answer together, so the history never
    /// holds a user message without its reply.
    pub fn record_turn(&mut self, query: impl Into<String>, answer: &Answer) {
        self.messages.push(Message::new(MessageRole::User, query));
        self.messages.push(Message::assistant(answer));
        self.updated_at = Utc::now();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of completed user/assistant turns.
    pub fn turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| matches!(m.role, MessageRole::User))
            .count()
    }

    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| matches!(m.role, MessageRole::User))
            .map(|m| m.content.as_str())
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            links: None,
        }
    }

    pub fn assistant(answer: &Answer) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: answer.text.clone(),
            links: answer.source_links.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}
