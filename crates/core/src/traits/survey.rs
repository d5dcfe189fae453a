//! Survey store traits

use crate::question::Question;
use crate::session::{AnswerSubmission, SessionClosing, SessionId};
use crate::Result;
use async_trait::async_trait;

/// Source of the questionnaire
#[async_trait]
pub trait QuestionRepository: Send + Sync + 'static {
    /// Fetch every question, sorted ascending by ordering key.
    ///
    /// Called once per session; the list is not re-read while the session
    /// is running.
    async fn fetch_questions(&self) -> Result<Vec<Question>>;
}

/// Persists sessions and their answers
///
/// Each call reports success or failure distinctly; deciding whether a
/// failure stops the conversation is left to the caller.
#[async_trait]
pub trait AnswerSubmitter: Send + Sync + 'static {
    /// Create a session record and return its identifier
    async fn open_session(&self) -> Result<SessionId>;

    /// Store the combined answer for one question
    async fn submit_answer(&self, submission: &AnswerSubmission) -> Result<()>;

    /// Close the session
    async fn finalize_session(&self, closing: &SessionClosing) -> Result<()>;
}
