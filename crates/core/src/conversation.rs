//! Conversation turns and the transcript used as model context

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// A questionnaire question read out by the agent
    Question,
    /// Something the respondent said
    Answer,
    /// Any other agent utterance (follow-ups, acknowledgements, farewells)
    System,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::Question => "question",
            TurnRole::Answer => "answer",
            TurnRole::System => "system",
        }
    }

    /// Whether the respondent (rather than the agent) spoke this turn
    pub fn is_respondent(&self) -> bool {
        matches!(self, TurnRole::Answer)
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single entry in the conversation transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Role of the speaker
    pub role: TurnRole,
    /// What was said
    pub content: String,
    /// When the turn occurred
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a new turn
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a question turn
    pub fn question(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Question, content)
    }

    /// Create a respondent answer turn
    pub fn answer(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Answer, content)
    }

    /// Create an agent utterance turn
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(TurnRole::System, content)
    }

    /// Get word count
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Ordered record of everything said during a session.
///
/// The full record is kept for reporting; model calls only ever see the
/// trailing window returned by [`Transcript::recent`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// The last `window` turns, oldest first
    pub fn recent(&self, window: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(window);
        &self.turns[start..]
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Everything the respondent said, in order
    pub fn respondent_utterances(&self) -> impl Iterator<Item = &str> {
        self.turns
            .iter()
            .filter(|t| t.role.is_respondent())
            .map(|t| t.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_window_is_bounded() {
        let mut transcript = Transcript::new();
        for i in 0..8 {
            transcript.push(Turn::answer(format!("utterance {}", i)));
        }

        let recent = transcript.recent(5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].content, "utterance 3");
        assert_eq!(recent[4].content, "utterance 7");
        assert_eq!(transcript.len(), 8);
    }

    #[test]
    fn test_recent_window_shorter_than_transcript() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::question("How do you like the city?"));
        assert_eq!(transcript.recent(5).len(), 1);
        assert!(Transcript::new().recent(5).is_empty());
    }

    #[test]
    fn test_respondent_utterances() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::question("Q1"));
        transcript.push(Turn::answer("the parks are nice"));
        transcript.push(Turn::system("Thanks! Anything else?"));
        transcript.push(Turn::answer("more benches"));

        let said: Vec<&str> = transcript.respondent_utterances().collect();
        assert_eq!(said, vec!["the parks are nice", "more benches"]);
    }

    #[test]
    fn test_turn_creation() {
        let turn = Turn::answer("I love the new library");
        assert_eq!(turn.role, TurnRole::Answer);
        assert_eq!(turn.word_count(), 5);
        assert_eq!(turn.role.to_string(), "answer");
    }
}
