//! Survey store layer for the survey agent
//!
//! Provides the question source and the answer sink used by the dialogue
//! engine:
//! - REST survey API client (sessions, questions, answers) with retry
//! - In-memory store for dry runs and tests
//! - JSON question files

pub mod client;
pub mod error;
pub mod memory;
pub mod questions_file;

pub use client::{ApiClientConfig, SurveyApiClient};
pub use error::PersistenceError;
pub use memory::InMemorySurveyStore;
pub use questions_file::FileQuestionRepository;

use std::sync::Arc;

use survey_agent_config::ApiConfig;
use survey_agent_core::{AnswerSubmitter, QuestionRepository};

/// Question source and answer sink selected from configuration
pub struct SurveyStore {
    pub questions: Arc<dyn QuestionRepository>,
    pub answers: Arc<dyn AnswerSubmitter>,
}

/// Build the store from API settings
///
/// - `questions_file` set: questions come from the file
/// - `base_url` empty: answers go to an in-memory store (dry run), which
///   also serves questions when no file is configured
/// - otherwise the REST client serves both
pub fn init(config: &ApiConfig) -> Result<SurveyStore, PersistenceError> {
    let file_questions: Option<Arc<dyn QuestionRepository>> = config
        .questions_file
        .as_ref()
        .map(|path| Arc::new(FileQuestionRepository::new(path)) as Arc<dyn QuestionRepository>);

    if config.is_dry_run() {
        tracing::warn!("No survey API configured, answers are kept in memory only");
        let store = Arc::new(InMemorySurveyStore::new());
        return Ok(SurveyStore {
            questions: file_questions.unwrap_or_else(|| store.clone() as Arc<dyn QuestionRepository>),
            answers: store,
        });
    }

    let client = Arc::new(SurveyApiClient::new(ApiClientConfig::from_settings(config))?);
    Ok(SurveyStore {
        questions: file_questions.unwrap_or_else(|| client.clone() as Arc<dyn QuestionRepository>),
        answers: client,
    })
}
