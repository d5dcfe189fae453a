//! Dialogue engine for the survey agent
//!
//! Features:
//! - Per-question session state (cursor, follow-ups, answer buffer, silence)
//! - Pure transition logic from classification label to next step
//! - Turn loop over injected speech, model and survey ports
//! - Event stream, abort handle and end-of-session report

pub mod engine;
pub mod events;
pub mod session;
pub mod transition;

pub use engine::{AbortHandle, DialogueEngine, DialoguePorts, SessionReport};
pub use events::{DialogueEvent, DialogueState, SessionOutcome};
pub use session::SurveySession;
pub use transition::{decide, Decision, Transition};

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Failed to fetch questions: {0}")]
    Questions(survey_agent_core::Error),

    #[error("Failed to open session: {0}")]
    SessionStart(survey_agent_core::Error),

    #[error("Invalid dialogue configuration: {0}")]
    Config(String),

    #[error("Aborted before the session started")]
    Aborted,
}

impl From<survey_agent_config::ConfigError> for AgentError {
    fn from(err: survey_agent_config::ConfigError) -> Self {
        AgentError::Config(err.to_string())
    }
}

impl From<AgentError> for survey_agent_core::Error {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Questions(e) | AgentError::SessionStart(e) => e,
            AgentError::Config(msg) => survey_agent_core::Error::Config(msg),
            AgentError::Aborted => survey_agent_core::Error::Internal("aborted".to_string()),
        }
    }
}
