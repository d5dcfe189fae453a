//! Survey Agent Runner
//!
//! Wires settings into the dialogue engine and runs sessions:
//! - layered settings, rejected outright when invalid
//! - speech backend, language model adapters and survey store from settings
//! - Prometheus exporter for the engine's metrics
//! - single or back-to-back sessions with a pause between respondents

pub mod metrics;

pub use crate::metrics::init_metrics;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use survey_agent_agent::{AgentError, DialogueEngine, DialoguePorts, SessionReport};
use survey_agent_config::{ConfigError, RunnerConfig, Settings};
use survey_agent_core::SpeechToText;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Speech backend error: {0}")]
    Speech(#[from] survey_agent_pipeline::PipelineError),

    #[error("LLM error: {0}")]
    Llm(#[from] survey_agent_llm::LlmError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] survey_agent_persistence::PersistenceError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Metrics error: {0}")]
    Metrics(String),
}

/// Load settings from `dir` for `env`.
///
/// Missing files fall back to built-in defaults; a file or variable that
/// fails to parse or validate is an error.
pub fn load_config(dir: impl AsRef<Path>, env: Option<&str>) -> Result<Settings, ServerError> {
    let settings = survey_agent_config::load_settings_from(dir, env)?;
    tracing::debug!(environment = ?settings.environment, "Settings loaded");
    Ok(settings)
}

/// Build a dialogue engine from settings
pub async fn build_engine(settings: &Settings) -> Result<DialogueEngine, ServerError> {
    let phrases = Arc::new(settings.phrase_book());

    let speech = survey_agent_pipeline::create_speech(&settings.speech, settings.dialogue.language).await?;
    let models = survey_agent_llm::LlmAdapters::from_settings(&settings.llm, phrases.clone())?;
    let store = survey_agent_persistence::init(&settings.api)?;

    tracing::info!(
        speech = %speech.stt.name(),
        model = %settings.llm.model,
        language = %settings.dialogue.language,
        dry_run = settings.api.is_dry_run(),
        "Dialogue engine configured"
    );

    let ports = DialoguePorts {
        stt: speech.stt,
        tts: speech.tts,
        classifier: models.classifier,
        generator: models.generator,
        questions: store.questions,
        answers: store.answers,
    };

    Ok(DialogueEngine::new(settings.dialogue.clone(), phrases, ports)?)
}

/// Run one session, or keep running sessions until aborted
pub async fn run_sessions(
    engine: &DialogueEngine,
    runner: &RunnerConfig,
) -> Result<Vec<SessionReport>, ServerError> {
    let mut reports = Vec::new();

    loop {
        let report = match engine.run().await {
            Ok(report) => report,
            Err(AgentError::Aborted) => break,
            Err(e) if runner.continuous && !reports.is_empty() => {
                tracing::error!(error = %e, "Session failed to start, retrying after pause");
                if pause(engine, runner).await {
                    break;
                }
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            session_id = %report.session_id,
            outcome = %report.outcome,
            answered = report.questions_answered,
            total = report.questions_total,
            "Session finished"
        );
        reports.push(report);

        if !runner.continuous || engine.is_aborted() {
            break;
        }
        if pause(engine, runner).await {
            break;
        }
    }

    Ok(reports)
}

/// Wait between respondents; returns true when aborted meanwhile
async fn pause(engine: &DialogueEngine, runner: &RunnerConfig) -> bool {
    let wait = Duration::from_secs(runner.pause_between_sessions_secs);
    let step = Duration::from_millis(100);
    let mut waited = Duration::ZERO;

    while waited < wait {
        if engine.is_aborted() {
            return true;
        }
        tokio::time::sleep(step).await;
        waited += step;
    }
    engine.is_aborted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_agent_agent::SessionOutcome;
    use survey_agent_config::{LlmSettings, RuntimeEnvironment, SpeechConfig};

    fn offline_settings(questions_file: Option<String>) -> Settings {
        let mut settings = Settings::default();
        settings.speech = SpeechConfig::default();
        settings.llm = LlmSettings {
            endpoint: "http://127.0.0.1:9".to_string(),
            max_retries: 0,
            timeout_secs: 1,
            ..LlmSettings::default()
        };
        settings.api.questions_file = questions_file;
        settings
    }

    #[test]
    fn test_invalid_environment_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("production.yaml"),
            "environment: production\ndialogue:\n  max_follow_ups: 11\napi:\n  base_url: https://survey.example.org/api\n",
        )
        .unwrap();

        let result = load_config(dir.path(), Some("production"));
        assert!(matches!(result, Err(ServerError::Config(_))));
    }

    #[test]
    fn test_production_without_api_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("production.yaml"),
            "environment: production\nllm:\n  api_key: gsk-test\n",
        )
        .unwrap();

        assert!(matches!(
            load_config(dir.path(), Some("production")),
            Err(ServerError::Config(ConfigError::MissingField(_)))
        ));
    }

    #[test]
    fn test_missing_files_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_config(dir.path(), Some("staging")).unwrap();
        assert_eq!(settings.environment, RuntimeEnvironment::Development);
        assert!(settings.api.is_dry_run());
    }

    #[tokio::test]
    async fn test_dry_run_without_questions_completes() {
        let engine = build_engine(&offline_settings(None)).await.unwrap();

        let reports = run_sessions(&engine, &RunnerConfig::default()).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].outcome, SessionOutcome::Completed);
        assert!(reports[0].finalized);
    }

    #[tokio::test]
    async fn test_aborted_engine_runs_nothing() {
        let engine = build_engine(&offline_settings(None)).await.unwrap();
        engine.abort_handle().abort();

        let runner = RunnerConfig {
            continuous: true,
            pause_between_sessions_secs: 0,
        };
        let reports = run_sessions(&engine, &runner).await.unwrap();
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn test_missing_questions_file_fails_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json").to_string_lossy().into_owned();
        let engine = build_engine(&offline_settings(Some(path))).await.unwrap();

        let result = run_sessions(&engine, &RunnerConfig::default()).await;
        assert!(matches!(result, Err(ServerError::Agent(AgentError::Questions(_)))));
    }
}
