//! Dialogue states and the events the engine broadcasts

use serde::{Deserialize, Serialize};
use survey_agent_core::{ClassificationLabel, QuestionId, SessionId};

/// Engine state within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    /// Putting question `idx` to the respondent
    AskingQuestion(usize),
    AwaitingUtterance,
    Classifying,
    Advancing,
    FollowingUp,
    Redirecting,
    Ending,
    Done,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Every question answered
    Completed,
    /// Respondent asked to stop
    EndRequested,
    /// Too many silent turns in a row
    SilenceTimeout,
    /// Stopped from outside between turns
    Aborted,
    /// Too many failed turns in a row
    Failed,
}

impl SessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionOutcome::Completed => "completed",
            SessionOutcome::EndRequested => "end_requested",
            SessionOutcome::SilenceTimeout => "silence_timeout",
            SessionOutcome::Aborted => "aborted",
            SessionOutcome::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dialogue event
#[derive(Debug, Clone)]
pub enum DialogueEvent {
    SessionStarted {
        session_id: SessionId,
        questions: usize,
    },
    StateChanged {
        from: DialogueState,
        to: DialogueState,
    },
    QuestionAsked {
        index: usize,
        question_id: QuestionId,
        /// False when the question was only recorded
        spoken: bool,
    },
    UtteranceHeard {
        text: String,
    },
    Silence {
        attempts: u32,
    },
    Classified {
        label: ClassificationLabel,
        effective: ClassificationLabel,
        forced: bool,
    },
    AnswerSubmitted {
        question_id: QuestionId,
        response: String,
    },
    SubmissionFailed {
        question_id: QuestionId,
        error: String,
    },
    Spoke {
        text: String,
    },
    TurnFailed {
        error: String,
        consecutive: u32,
    },
    Ended {
        outcome: SessionOutcome,
    },
}
