//! Dialogue engine configuration

use serde::{Deserialize, Serialize};
use survey_agent_core::Language;

use crate::constants::dialogue;
use crate::ConfigError;

/// Limits and policy switches for one survey conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Follow-ups allowed per question; reaching it forces a Complete
    #[serde(default = "default_max_follow_ups")]
    pub max_follow_ups: u32,

    /// Consecutive silent turns before the session ends
    #[serde(default = "default_max_silent_attempts")]
    pub max_silent_attempts: u32,

    /// Transcript entries passed to the classifier and generator
    #[serde(default = "default_transcript_window")]
    pub transcript_window: usize,

    /// Keep off-topic utterances in the combined answer
    #[serde(default)]
    pub append_off_topic: bool,

    /// Speak a short nudge after a non-terminal silent turn
    #[serde(default = "default_true")]
    pub reprompt_on_silence: bool,

    /// Speak the next question verbatim after the advance reply
    #[serde(default)]
    pub repeat_question_after_advance: bool,

    /// Let the model word the farewell instead of the canned phrase
    #[serde(default)]
    pub generate_farewell: bool,

    /// Spoken once before the first question
    #[serde(default)]
    pub opening_greeting: Option<String>,

    /// Failed turns in a row before the session is abandoned
    #[serde(default = "default_max_consecutive_failures")]
    pub max_consecutive_failures: u32,

    /// Survey language
    #[serde(default)]
    pub language: Language,
}

fn default_max_follow_ups() -> u32 {
    dialogue::MAX_FOLLOW_UPS
}
fn default_max_silent_attempts() -> u32 {
    dialogue::MAX_SILENT_ATTEMPTS
}
fn default_transcript_window() -> usize {
    dialogue::TRANSCRIPT_WINDOW
}
fn default_max_consecutive_failures() -> u32 {
    dialogue::MAX_CONSECUTIVE_FAILURES
}
fn default_true() -> bool {
    true
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            max_follow_ups: default_max_follow_ups(),
            max_silent_attempts: default_max_silent_attempts(),
            transcript_window: default_transcript_window(),
            append_off_topic: false,
            reprompt_on_silence: true,
            repeat_question_after_advance: false,
            generate_farewell: false,
            opening_greeting: None,
            max_consecutive_failures: default_max_consecutive_failures(),
            language: Language::default(),
        }
    }
}

impl DialogueConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_follow_ups > dialogue::MAX_FOLLOW_UPS_LIMIT {
            return Err(ConfigError::invalid(
                "dialogue.max_follow_ups",
                format!(
                    "Must be at most {}, got {}",
                    dialogue::MAX_FOLLOW_UPS_LIMIT,
                    self.max_follow_ups
                ),
            ));
        }

        if self.max_silent_attempts == 0 {
            return Err(ConfigError::invalid(
                "dialogue.max_silent_attempts",
                "Must be at least 1",
            ));
        }

        if self.transcript_window == 0 {
            return Err(ConfigError::invalid(
                "dialogue.transcript_window",
                "Must be at least 1",
            ));
        }

        if self.max_consecutive_failures == 0 {
            return Err(ConfigError::invalid(
                "dialogue.max_consecutive_failures",
                "Must be at least 1",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DialogueConfig::default();
        assert_eq!(config.max_follow_ups, 2);
        assert_eq!(config.max_silent_attempts, 5);
        assert_eq!(config.transcript_window, 5);
        assert!(!config.append_off_topic);
        assert!(config.reprompt_on_silence);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_follow_ups_is_allowed() {
        let config = DialogueConfig {
            max_follow_ups: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_limits() {
        let mut config = DialogueConfig::default();
        config.max_follow_ups = 11;
        assert!(config.validate().is_err());

        let mut config = DialogueConfig::default();
        config.max_silent_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = DialogueConfig::default();
        config.transcript_window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: DialogueConfig =
            serde_yaml::from_str("max_follow_ups: 3\nlanguage: nl\n").unwrap();
        assert_eq!(config.max_follow_ups, 3);
        assert_eq!(config.language, Language::Dutch);
        assert_eq!(config.max_silent_attempts, 5);
    }
}
