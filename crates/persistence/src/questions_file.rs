//! Question lists stored as JSON files
//!
//! Accepts an array of objects carrying the question under `text` or
//! `question`. Missing `id` and `orderNumber` default to the 1-based
//! position in the file:
//!
//! ```json
//! [
//!   {"question": "How do you like the park?"},
//!   {"id": 7, "text": "What would you improve?", "orderNumber": 2}
//! ]
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use survey_agent_core::{sort_questions, Question, QuestionId, QuestionRepository, Result};

use crate::PersistenceError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionEntry {
    #[serde(default)]
    id: Option<QuestionId>,
    #[serde(alias = "question")]
    text: String,
    #[serde(default)]
    order_number: Option<i32>,
}

/// Reads questions from a JSON file on every fetch
pub struct FileQuestionRepository {
    path: PathBuf,
}

impl FileQuestionRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> std::result::Result<Vec<Question>, PersistenceError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PersistenceError::QuestionFile(format!("{}: {}", self.path.display(), e))
        })?;

        parse_questions(&content)
            .map_err(|e| PersistenceError::QuestionFile(format!("{}: {}", self.path.display(), e)))
    }
}

fn parse_questions(content: &str) -> std::result::Result<Vec<Question>, serde_json::Error> {
    let entries: Vec<QuestionEntry> = serde_json::from_str(content)?;

    let mut questions: Vec<Question> = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let position = index + 1;
            Question::new(
                entry.id.unwrap_or(position as QuestionId),
                entry.text,
                entry.order_number.unwrap_or(position as i32),
            )
        })
        .collect();
    sort_questions(&mut questions);
    Ok(questions)
}

#[async_trait]
impl QuestionRepository for FileQuestionRepository {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        let questions = self.load().await?;
        tracing::info!(path = %self.path.display(), count = questions.len(), "Loaded questions from file");
        Ok(questions)
    }
}
