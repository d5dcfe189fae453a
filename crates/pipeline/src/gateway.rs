//! HTTP Speech Gateway - Calls an external speech sidecar
//!
//! The sidecar owns the microphone and speaker. Capture and transcription
//! of one utterance is a single `POST /listen`; synthesis and playback is a
//! single `POST /speak` that returns once audio has finished playing.
//!
//! ## Endpoints
//! - `GET /health`
//! - `POST /listen` `{language, timeout_secs}` → `{text, confidence?, error?}`
//! - `POST /speak` `{text, language, voice?}` → 2xx when playback is done

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use survey_agent_config::SpeechConfig;
use survey_agent_core::{Language, SpeechToText, TextToSpeech};

use crate::PipelineError;

/// Extra time on top of the capture window before the request gives up
const REQUEST_MARGIN: Duration = Duration::from_secs(5);

/// HTTP speech gateway configuration
#[derive(Debug, Clone)]
pub struct HttpSpeechConfig {
    /// Base URL of the sidecar
    pub url: String,
    pub language: Language,
    /// Voice name for synthesis
    pub voice: Option<String>,
    /// Longest a single capture may take
    pub listen_timeout: Duration,
}

impl Default for HttpSpeechConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8090".to_string(),
            language: Language::English,
            voice: None,
            listen_timeout: Duration::from_secs(10),
        }
    }
}

impl HttpSpeechConfig {
    pub fn from_settings(settings: &SpeechConfig, language: Language) -> Self {
        Self {
            url: settings.gateway_url.clone(),
            language,
            voice: settings.voice.clone(),
            listen_timeout: Duration::from_secs(settings.listen_timeout_secs),
        }
    }
}

#[derive(Debug, Serialize)]
struct ListenRequest<'a> {
    language: &'a str,
    timeout_secs: u64,
}

/// Response from the sidecar's listen endpoint
#[derive(Debug, Deserialize)]
struct ListenResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    confidence: Option<f32>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct SpeakRequest<'a> {
    text: &'a str,
    language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice: Option<&'a str>,
}

/// Speech sidecar client
pub struct HttpSpeechGateway {
    config: HttpSpeechConfig,
    client: Client,
}

impl HttpSpeechGateway {
    pub fn new(config: HttpSpeechConfig) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .build()
            .map_err(|e| PipelineError::Service(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), path)
    }

    /// Probe the sidecar; failures are logged, not fatal
    pub async fn check_health(&self) -> bool {
        match self
            .client
            .get(self.url("/health"))
            .timeout(Duration::from_secs(3))
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(url = %self.config.url, language = %self.config.language, "Speech gateway connected");
                true
            }
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "Speech gateway unhealthy, proceeding anyway");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Speech gateway not reachable, will retry on first request");
                false
            }
        }
    }

    async fn capture(&self) -> Result<String, PipelineError> {
        let request = ListenRequest {
            language: self.config.language.code(),
            timeout_secs: self.config.listen_timeout.as_secs(),
        };

        let response = self
            .client
            .post(self.url("/listen"))
            .timeout(self.config.listen_timeout + REQUEST_MARGIN)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PipelineError::Timeout
                } else {
                    PipelineError::Capture(format!("Listen request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(PipelineError::Service(format!(
                "Listen returned {}",
                response.status()
            )));
        }

        let result: ListenResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Service(format!("Failed to parse listen response: {}", e)))?;

        if let Some(error) = result.error {
            return Err(PipelineError::Capture(error));
        }

        tracing::debug!(
            chars = result.text.len(),
            confidence = result.confidence.unwrap_or_default(),
            "Utterance captured"
        );

        Ok(result.text)
    }

    async fn playback(&self, text: &str) -> Result<(), PipelineError> {
        let request = SpeakRequest {
            text,
            language: self.config.language.code(),
            voice: self.config.voice.as_deref(),
        };

        let response = self
            .client
            .post(self.url("/speak"))
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Playback(format!("Speak request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PipelineError::Playback(format!(
                "Speak returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl SpeechToText for HttpSpeechGateway {
    async fn listen(&self) -> survey_agent_core::Result<String> {
        Ok(self.capture().await?)
    }

    fn name(&self) -> &str {
        "http-gateway"
    }
}

#[async_trait]
impl TextToSpeech for HttpSpeechGateway {
    async fn speak(&self, text: &str) -> survey_agent_core::Result<()> {
        Ok(self.playback(text).await?)
    }

    fn name(&self) -> &str {
        "http-gateway"
    }
}
