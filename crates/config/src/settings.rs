//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{endpoints, env_vars, models, sampling, timeouts};
use crate::{ConfigError, DialogueConfig, PhraseBook, PhraseOverrides};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation
    #[default]
    Development,
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Dialogue limits and policy switches
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Language model backend
    #[serde(default)]
    pub llm: LlmSettings,

    /// Survey API
    #[serde(default)]
    pub api: ApiConfig,

    /// Speech capture and playback
    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Back-to-back session runner
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Replacements for built-in phrases
    #[serde(default)]
    pub phrases: PhraseOverrides,
}

impl Settings {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dialogue.validate()?;
        self.validate_llm()?;
        self.validate_api()?;
        self.validate_speech()?;
        Ok(())
    }

    /// Phrase pack for the configured language with overrides applied
    pub fn phrase_book(&self) -> PhraseBook {
        PhraseBook::resolve(self.dialogue.language, &self.phrases)
    }

    fn validate_llm(&self) -> Result<(), ConfigError> {
        let llm = &self.llm;

        if !(0.0..=2.0).contains(&llm.temperature) {
            return Err(ConfigError::invalid(
                "llm.temperature",
                format!("Must be between 0.0 and 2.0, got {}", llm.temperature),
            ));
        }

        if !(0.0..=1.0).contains(&llm.top_p) {
            return Err(ConfigError::invalid(
                "llm.top_p",
                format!("Must be between 0.0 and 1.0, got {}", llm.top_p),
            ));
        }

        if llm.max_tokens == 0 || llm.classifier_max_tokens == 0 {
            return Err(ConfigError::invalid(
                "llm.max_tokens",
                "Token limits must be at least 1",
            ));
        }

        validate_url("llm.endpoint", &llm.endpoint)?;

        if self.environment.is_production()
            && llm.provider == LlmProviderKind::OpenAi
            && llm.api_key.is_none()
        {
            return Err(ConfigError::MissingField("llm.api_key".to_string()));
        }

        Ok(())
    }

    fn validate_api(&self) -> Result<(), ConfigError> {
        let api = &self.api;

        if api.base_url.is_empty() {
            if self.environment.is_production() && api.questions_file.is_none() {
                return Err(ConfigError::MissingField("api.base_url".to_string()));
            }
        } else {
            validate_url("api.base_url", &api.base_url)?;
        }

        if api.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "api.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }

        Ok(())
    }

    fn validate_speech(&self) -> Result<(), ConfigError> {
        if self.speech.backend == SpeechBackendKind::Http {
            validate_url("speech.gateway_url", &self.speech.gateway_url)?;
        }
        Ok(())
    }
}

fn validate_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("Must be an http(s) URL, got '{}'", url),
        ))
    }
}

/// Which chat API the LLM backend speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderKind {
    /// OpenAI-compatible `/chat/completions` (Groq, OpenAI, vLLM)
    #[default]
    #[serde(alias = "groq")]
    OpenAi,
    /// Local Ollama `/api/chat`
    Ollama,
}

/// Language model settings shared by the classifier and the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub provider: LlmProviderKind,

    /// Base URL of the chat API
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Falls back to `GROQ_API_KEY`
    #[serde(default = "default_llm_api_key")]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Generator reply limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Classifier reply limit
    #[serde(default = "default_classifier_max_tokens")]
    pub classifier_max_tokens: u32,

    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_llm_max_retries")]
    pub max_retries: u32,
}

fn default_llm_endpoint() -> String {
    endpoints::GROQ_DEFAULT.to_string()
}
fn default_llm_model() -> String {
    models::GROQ_DEFAULT.to_string()
}
fn default_llm_api_key() -> Option<String> {
    std::env::var(env_vars::LLM_API_KEY).ok().filter(|k| !k.is_empty())
}
fn default_temperature() -> f32 {
    sampling::TEMPERATURE
}
fn default_top_p() -> f32 {
    sampling::TOP_P
}
fn default_max_tokens() -> u32 {
    sampling::MAX_TOKENS
}
fn default_classifier_max_tokens() -> u32 {
    sampling::CLASSIFIER_MAX_TOKENS
}
fn default_llm_timeout_secs() -> u64 {
    timeouts::LLM_REQUEST_SECS
}
fn default_llm_max_retries() -> u32 {
    timeouts::LLM_MAX_RETRIES
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::default(),
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            api_key: default_llm_api_key(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            classifier_max_tokens: default_classifier_max_tokens(),
            timeout_secs: default_llm_timeout_secs(),
            max_retries: default_llm_max_retries(),
        }
    }
}

/// Survey API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; empty selects the in-memory dry-run store
    #[serde(default)]
    pub base_url: String,

    /// Bench (device) the sessions are recorded against
    #[serde(default)]
    pub bench_id: Option<i64>,

    /// Falls back to `SURVEY_API_TOKEN`
    #[serde(default = "default_api_token")]
    pub bearer_token: Option<String>,

    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for transient failures (network, timeout, 5xx)
    #[serde(default = "default_api_max_retries")]
    pub max_retries: u32,

    /// First retry delay; doubles on each attempt
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Read questions from a local JSON file instead of the API
    #[serde(default)]
    pub questions_file: Option<String>,
}

fn default_api_token() -> Option<String> {
    std::env::var(env_vars::API_TOKEN).ok().filter(|t| !t.is_empty())
}
fn default_api_timeout_secs() -> u64 {
    timeouts::API_REQUEST_SECS
}
fn default_api_max_retries() -> u32 {
    timeouts::API_MAX_RETRIES
}
fn default_initial_backoff_ms() -> u64 {
    timeouts::API_INITIAL_BACKOFF_MS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            bench_id: None,
            bearer_token: default_api_token(),
            timeout_secs: default_api_timeout_secs(),
            max_retries: default_api_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            questions_file: None,
        }
    }
}

impl ApiConfig {
    /// Whether answers go to the in-memory store
    pub fn is_dry_run(&self) -> bool {
        self.base_url.trim().is_empty()
    }
}

/// Speech backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeechBackendKind {
    /// Typed input, printed output
    #[default]
    Console,
    /// Speech gateway sidecar over HTTP
    Http,
}

/// Speech settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub backend: SpeechBackendKind,

    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Voice name passed to the gateway
    #[serde(default)]
    pub voice: Option<String>,

    /// Longest a single capture may take
    #[serde(default = "default_listen_timeout_secs")]
    pub listen_timeout_secs: u64,
}

fn default_gateway_url() -> String {
    endpoints::SPEECH_GATEWAY_DEFAULT.to_string()
}
fn default_listen_timeout_secs() -> u64 {
    timeouts::LISTEN_SECS
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            backend: SpeechBackendKind::default(),
            gateway_url: default_gateway_url(),
            voice: None,
            listen_timeout_secs: default_listen_timeout_secs(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Serve Prometheus metrics on this port when set
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_port: None,
        }
    }
}

/// Session runner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Start a new session as soon as one ends
    #[serde(default)]
    pub continuous: bool,

    #[serde(default = "default_pause_secs")]
    pub pause_between_sessions_secs: u64,
}

fn default_pause_secs() -> u64 {
    5
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            continuous: false,
            pause_between_sessions_secs: default_pause_secs(),
        }
    }
}

/// Load settings from `config/` relative to the working directory
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Load settings from an explicit configuration directory
///
/// Sources, later ones winning: `<dir>/default.*`, `<dir>/<env>.*`, then
/// `SURVEY_AGENT__SECTION__KEY` environment variables.
pub fn load_settings_from(dir: impl AsRef<Path>, env: Option<&str>) -> Result<Settings, ConfigError> {
    let dir = dir.as_ref();
    let mut builder = Config::builder();

    builder = builder.add_source(File::from(dir.join("default")).required(false));

    if let Some(env_name) = env {
        builder = builder.add_source(File::from(dir.join(env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("SURVEY_AGENT")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        environment = ?settings.environment,
        language = %settings.dialogue.language,
        dry_run = settings.api.is_dry_run(),
        "Settings loaded"
    );

    Ok(settings)
}
