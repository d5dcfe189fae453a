//! LLM Factory
//!
//! Creates the chat backend from settings and wires the classifier and
//! generator adapters on top of it. Both adapters share one backend; the
//! classifier overrides sampling with a deterministic short reply.
//!
//! ## Example
//! ```ignore
//! let settings = load_settings(None)?;
//! let phrases = Arc::new(settings.phrase_book());
//! let adapters = LlmAdapters::from_settings(&settings.llm, phrases)?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use survey_agent_config::{LlmProviderKind, LlmSettings, PhraseBook};
use survey_agent_core::{ResponseClassifier, ResponseGenerator};

use crate::backend::{
    GenerationOptions, LlmBackend, LlmConfig, OllamaBackend, OpenAIBackend, OpenAIConfig,
    RetryPolicy,
};
use crate::classifier::LlmResponseClassifier;
use crate::generator::LlmResponseGenerator;
use crate::LlmError;

fn retry_policy(settings: &LlmSettings) -> RetryPolicy {
    RetryPolicy {
        max_retries: settings.max_retries,
        ..RetryPolicy::default()
    }
}

/// Create the chat backend selected in settings
pub fn create_backend(settings: &LlmSettings) -> Result<Arc<dyn LlmBackend>, LlmError> {
    let timeout = Duration::from_secs(settings.timeout_secs);

    let backend: Arc<dyn LlmBackend> = match settings.provider {
        LlmProviderKind::OpenAi => {
            let config = OpenAIConfig {
                endpoint: settings.endpoint.clone(),
                api_key: settings.api_key.clone().unwrap_or_default(),
                model: settings.model.clone(),
                timeout,
                retry: retry_policy(settings),
            };
            Arc::new(OpenAIBackend::new(config)?)
        }
        LlmProviderKind::Ollama => {
            let config = LlmConfig {
                model: settings.model.clone(),
                endpoint: settings.endpoint.clone(),
                timeout,
                retry: retry_policy(settings),
                ..LlmConfig::default()
            };
            Arc::new(OllamaBackend::new(config)?)
        }
    };

    tracing::info!(
        provider = ?settings.provider,
        model = backend.model_name(),
        endpoint = %settings.endpoint,
        "LLM backend created"
    );

    Ok(backend)
}

/// Classifier and generator sharing one backend
pub struct LlmAdapters {
    pub classifier: Arc<dyn ResponseClassifier>,
    pub generator: Arc<dyn ResponseGenerator>,
}

impl LlmAdapters {
    /// Build both adapters on an existing backend
    pub fn new(backend: Arc<dyn LlmBackend>, settings: &LlmSettings, phrases: Arc<PhraseBook>) -> Self {
        let options = GenerationOptions {
            temperature: settings.temperature,
            top_p: settings.top_p,
            max_tokens: settings.max_tokens,
        };

        Self {
            classifier: Arc::new(LlmResponseClassifier::new(
                backend.clone(),
                phrases.clone(),
                settings.classifier_max_tokens,
            )),
            generator: Arc::new(LlmResponseGenerator::new(backend, phrases, options)),
        }
    }

    /// Create the backend from settings, then both adapters
    pub fn from_settings(settings: &LlmSettings, phrases: Arc<PhraseBook>) -> Result<Self, LlmError> {
        let backend = create_backend(settings)?;
        Ok(Self::new(backend, settings, phrases))
    }
}
