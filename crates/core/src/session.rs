//! Survey session records exchanged with the answer store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::question::QuestionId;

/// Identifier of a survey session, assigned by the answer store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Locally generated identifier for stores that do not assign one
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A finalized answer for one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    /// Combined answer: every accumulated utterance joined with single spaces
    pub response: String,
}

impl AnswerSubmission {
    pub fn new(session_id: SessionId, question_id: QuestionId, response: impl Into<String>) -> Self {
        Self {
            session_id,
            question_id,
            response: response.into(),
        }
    }
}

/// Data sent when a session is closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClosing {
    pub session_id: SessionId,
    pub ended_at: DateTime<Utc>,
    /// Filled in later by post-processing jobs
    pub summary: Option<String>,
    pub sentiment: Option<String>,
}

impl SessionClosing {
    /// Closing record stamped with the current time
    pub fn now(session_id: SessionId) -> Self {
        Self {
            session_id,
            ended_at: Utc::now(),
            summary: None,
            sentiment: None,
        }
    }
}
