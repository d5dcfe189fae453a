//! In-memory survey store
//!
//! Serves a fixed question list and records sessions, answers and closings.
//! Used for dry runs without a survey API and as a test double.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use survey_agent_core::{
    sort_questions, AnswerSubmission, AnswerSubmitter, Question, QuestionRepository, Result,
    SessionClosing, SessionId,
};

#[derive(Default)]
struct StoreState {
    sessions: Vec<SessionId>,
    answers: Vec<AnswerSubmission>,
    closings: HashMap<SessionId, SessionClosing>,
}

/// Survey store kept in process memory
#[derive(Default)]
pub struct InMemorySurveyStore {
    questions: Vec<Question>,
    state: RwLock<StoreState>,
}

impl InMemorySurveyStore {
    /// Empty store without questions
    pub fn new() -> Self {
        Self::default()
    }

    /// Store serving the given questions, in ascending order
    pub fn with_questions(mut questions: Vec<Question>) -> Self {
        sort_questions(&mut questions);
        Self {
            questions,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Sessions opened so far
    pub fn sessions(&self) -> Vec<SessionId> {
        self.state.read().sessions.clone()
    }

    /// Answers submitted so far, in submission order
    pub fn answers(&self) -> Vec<AnswerSubmission> {
        self.state.read().answers.clone()
    }

    /// Answers belonging to one session
    pub fn answers_for(&self, session_id: &SessionId) -> Vec<AnswerSubmission> {
        self.state
            .read()
            .answers
            .iter()
            .filter(|a| &a.session_id == session_id)
            .cloned()
            .collect()
    }

    pub fn closing(&self, session_id: &SessionId) -> Option<SessionClosing> {
        self.state.read().closings.get(session_id).cloned()
    }

    pub fn is_finalized(&self, session_id: &SessionId) -> bool {
        self.state.read().closings.contains_key(session_id)
    }
}

#[async_trait]
impl QuestionRepository for InMemorySurveyStore {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        Ok(self.questions.clone())
    }
}

#[async_trait]
impl AnswerSubmitter for InMemorySurveyStore {
    async fn open_session(&self) -> Result<SessionId> {
        let session_id = SessionId::generate();
        self.state.write().sessions.push(session_id.clone());
        tracing::debug!(session_id = %session_id, "In-memory session opened");
        Ok(session_id)
    }

    async fn submit_answer(&self, submission: &AnswerSubmission) -> Result<()> {
        tracing::info!(
            session_id = %submission.session_id,
            question_id = submission.question_id,
            response = %submission.response,
            "Answer recorded (dry run)"
        );
        self.state.write().answers.push(submission.clone());
        Ok(())
    }

    async fn finalize_session(&self, closing: &SessionClosing) -> Result<()> {
        self.state
            .write()
            .closings
            .insert(closing.session_id.clone(), closing.clone());
        tracing::debug!(session_id = %closing.session_id, "In-memory session closed");
        Ok(())
    }
}
