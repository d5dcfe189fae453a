//! Survey session state
//!
//! One [`SurveySession`] exists per respondent. It is owned by the engine
//! run that created it and mutated only between turns.

use survey_agent_core::{Question, SessionId, Transcript, Turn};

/// State of the single active conversation
#[derive(Debug, Clone)]
pub struct SurveySession {
    id: SessionId,
    questions: Vec<Question>,
    /// Index of the question being asked; `questions.len()` once finished
    cursor: usize,
    /// Follow-ups spent on the current question
    follow_ups: u32,
    /// Utterances given since the current question was asked
    responses: Vec<String>,
    /// Consecutive silent turns
    silent_attempts: u32,
    transcript: Transcript,
}

impl SurveySession {
    /// Questions must already be in asking order
    pub fn new(id: SessionId, questions: Vec<Question>) -> Self {
        Self {
            id,
            questions,
            cursor: 0,
            follow_ups: 0,
            responses: Vec::new(),
            silent_attempts: 0,
            transcript: Transcript::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn follow_ups(&self) -> u32 {
        self.follow_ups
    }

    pub fn silent_attempts(&self) -> u32 {
        self.silent_attempts
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    /// Question after the current one, used as the advance hint
    pub fn next_question(&self) -> Option<&Question> {
        self.questions.get(self.cursor + 1)
    }

    /// Every question has been answered
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.questions.len()
    }

    /// Last `window` transcript entries, oldest first
    pub fn history(&self, window: usize) -> &[Turn] {
        self.transcript.recent(window)
    }

    pub fn record(&mut self, turn: Turn) {
        self.transcript.push(turn);
    }

    /// Count a silent turn and return the new total
    pub fn record_silence(&mut self) -> u32 {
        self.silent_attempts += 1;
        self.silent_attempts
    }

    pub fn reset_silence(&mut self) {
        self.silent_attempts = 0;
    }

    pub fn push_response(&mut self, utterance: impl Into<String>) {
        self.responses.push(utterance.into());
    }

    /// Buffered utterances joined with single spaces
    pub fn combined_answer(&self) -> String {
        self.responses.join(" ")
    }

    /// Drop the buffer without submitting it
    pub fn discard_responses(&mut self) {
        self.responses.clear();
    }

    pub fn record_follow_up(&mut self) {
        self.follow_ups += 1;
    }

    /// Move to the next question. Clears the buffer and follow-up count.
    pub fn advance(&mut self) {
        if self.is_complete() {
            return;
        }
        self.cursor += 1;
        self.follow_ups = 0;
        self.responses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SurveySession {
        SurveySession::new(
            SessionId::new("s1"),
            vec![Question::new(1, "Q1", 1), Question::new(2, "Q2", 2)],
        )
    }

    #[test]
    fn test_advance_resets_question_state() {
        let mut session = session();
        session.push_response("a");
        session.push_response("b");
        session.record_follow_up();
        assert_eq!(session.combined_answer(), "a b");
        assert_eq!(session.next_question().map(|q| q.id), Some(2));

        session.advance();
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.follow_ups(), 0);
        assert!(session.responses().is_empty());
        assert!(session.next_question().is_none());

        session.advance();
        assert!(session.is_complete());
        assert!(session.current_question().is_none());

        session.advance();
        assert_eq!(session.cursor(), 2);
    }

    #[test]
    fn test_silence_counter() {
        let mut session = session();
        assert_eq!(session.record_silence(), 1);
        assert_eq!(session.record_silence(), 2);
        session.reset_silence();
        assert_eq!(session.silent_attempts(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut session = session();
        for i in 0..8 {
            session.record(Turn::answer(format!("u{}", i)));
        }
        let history = session.history(5);
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].content, "u3");
        assert_eq!(session.transcript().len(), 8);
    }

    #[test]
    fn test_empty_questionnaire_is_complete() {
        let session = SurveySession::new(SessionId::new("s"), Vec::new());
        assert!(session.is_complete());
    }
}
