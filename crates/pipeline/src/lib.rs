//! Speech ports for the survey agent
//!
//! Capture and playback are treated as blocking calls by the dialogue
//! engine. Two backends implement both [`SpeechToText`] and
//! [`TextToSpeech`]:
//! - [`HttpSpeechGateway`]: a sidecar service owning the microphone,
//!   transcription and synthesis
//! - [`ConsoleSpeech`]: typed input and printed output, for text-mode runs
//!
//! [`SpeechToText`]: survey_agent_core::SpeechToText
//! [`TextToSpeech`]: survey_agent_core::TextToSpeech

pub mod console;
pub mod gateway;

pub use console::ConsoleSpeech;
pub use gateway::{HttpSpeechConfig, HttpSpeechGateway};

use std::sync::Arc;

use survey_agent_config::{SpeechBackendKind, SpeechConfig};
use survey_agent_core::{Language, SpeechToText, TextToSpeech};
use thiserror::Error;

/// Pipeline errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Speech service error: {0}")]
    Service(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timeout")]
    Timeout,
}

impl From<PipelineError> for survey_agent_core::Error {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Playback(msg) => survey_agent_core::Error::Playback(msg),
            PipelineError::Timeout => survey_agent_core::Error::Timeout,
            other => survey_agent_core::Error::Capture(other.to_string()),
        }
    }
}

/// Capture and playback ports, possibly backed by the same object
pub struct SpeechPorts {
    pub stt: Arc<dyn SpeechToText>,
    pub tts: Arc<dyn TextToSpeech>,
}

/// Build the speech backend selected in settings
pub async fn create_speech(config: &SpeechConfig, language: Language) -> Result<SpeechPorts, PipelineError> {
    match config.backend {
        SpeechBackendKind::Console => {
            let console = Arc::new(ConsoleSpeech::stdio());
            Ok(SpeechPorts {
                stt: console.clone(),
                tts: console,
            })
        }
        SpeechBackendKind::Http => {
            let gateway = HttpSpeechGateway::new(HttpSpeechConfig::from_settings(config, language))?;
            gateway.check_health().await;
            let gateway = Arc::new(gateway);
            Ok(SpeechPorts {
                stt: gateway.clone(),
                tts: gateway,
            })
        }
    }
}
