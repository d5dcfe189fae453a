//! Classification labels and directive prompt variants

use serde::{Deserialize, Serialize};

/// Verdict on one respondent utterance against the current question.
///
/// Produced once per turn, consumed immediately by the transition logic and
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationLabel {
    /// On topic and answers the question well enough
    Complete,
    /// On topic but lacking detail
    #[default]
    Incomplete,
    /// Unrelated to the question
    OffTopic,
    /// The respondent wants to stop
    EndRequested,
}

impl ClassificationLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationLabel::Complete => "complete",
            ClassificationLabel::Incomplete => "incomplete",
            ClassificationLabel::OffTopic => "off_topic",
            ClassificationLabel::EndRequested => "end_requested",
        }
    }

    /// All labels, in taxonomy order
    pub const ALL: [ClassificationLabel; 4] = [
        ClassificationLabel::Complete,
        ClassificationLabel::Incomplete,
        ClassificationLabel::OffTopic,
        ClassificationLabel::EndRequested,
    ];
}

impl std::fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which instruction the response generator receives for a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    /// Warm acknowledgement, then move on to the next question
    Advance,
    /// Open-ended clarifying question on the same topic
    Probe,
    /// Acknowledge a tangent without answering it and steer back
    Redirect,
    /// Thank the respondent and close the conversation
    Farewell,
}

impl Directive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Directive::Advance => "advance",
            Directive::Probe => "probe",
            Directive::Redirect => "redirect",
            Directive::Farewell => "farewell",
        }
    }
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
