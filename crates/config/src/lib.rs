//! Configuration management for the survey agent
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default.*`, then `config/<env>.*`)
//! - Environment variables (`SURVEY_AGENT__` prefix, `__` separator)
//!
//! # Phrase packs
//!
//! Every sentence the agent speaks or sends to a model comes from a
//! [`PhraseBook`]. English and Dutch packs are built in; individual phrases
//! can be replaced through the `phrases` section.

pub mod constants;
pub mod dialogue;
pub mod phrases;
pub mod settings;

pub use dialogue::DialogueConfig;
pub use phrases::{PhraseBook, PhraseOverrides, TimeOfDay};
pub use settings::{
    load_settings, load_settings_from, ApiConfig, LlmProviderKind, LlmSettings,
    ObservabilityConfig, RunnerConfig, RuntimeEnvironment, Settings, SpeechBackendKind,
    SpeechConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for survey_agent_core::Error {
    fn from(err: ConfigError) -> Self {
        survey_agent_core::Error::Config(err.to_string())
    }
}
