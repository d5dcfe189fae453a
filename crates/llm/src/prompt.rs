//! Prompt Building
//!
//! Assembles chat messages for the classifier and the generator. Transcript
//! turns map onto chat roles: respondent answers become `user` messages,
//! everything the agent said becomes `assistant` messages.

use std::fmt;
use serde::{Deserialize, Serialize};
use survey_agent_core::{Turn, TurnRole};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

impl From<TurnRole> for Role {
    fn from(role: TurnRole) -> Self {
        match role {
            TurnRole::Answer => Role::User,
            TurnRole::Question | TurnRole::System => Role::Assistant,
        }
    }
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role.into(),
            content: turn.content.clone(),
        }
    }
}

/// Builder for a chat message list
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    system: Vec<String>,
    messages: Vec<Message>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section to the system message; sections are separated by a
    /// blank line
    pub fn system_section(mut self, section: impl Into<String>) -> Self {
        let section = section.into();
        if !section.trim().is_empty() {
            self.system.push(section);
        }
        self
    }

    /// Append transcript turns, oldest first
    pub fn with_history(mut self, history: &[Turn]) -> Self {
        self.messages.extend(history.iter().map(Message::from));
        self
    }

    /// Append the final user message
    pub fn user_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(Message::user(message));
        self
    }

    /// Build the message list, system message first
    pub fn build(self) -> Vec<Message> {
        let mut out = Vec::with_capacity(self.messages.len() + 1);
        if !self.system.is_empty() {
            out.push(Message::system(self.system.join("\n\n")));
        }
        out.extend(self.messages);
        out
    }
}
