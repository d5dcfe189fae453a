//! Response generator adapter
//!
//! Produces the next spoken utterance for a directive. The system message
//! carries the persona, the directive text, a time-of-day sentence and the
//! follow-up question hint; the transcript window and the respondent's
//! utterance follow. On failure, or when the model returns nothing, the
//! language's fallback sentence is returned instead.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Timelike;
use survey_agent_config::{PhraseBook, TimeOfDay};
use survey_agent_core::{GenerationRequest, ResponseGenerator};

use crate::backend::{FinishReason, GenerationOptions, LlmBackend};
use crate::prompt::{Message, PromptBuilder};

/// Source of the current hour, injectable for tests
pub trait Clock: Send + Sync {
    /// Local hour, 0-23
    fn hour(&self) -> u32;
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

/// Generator backed by a chat model
pub struct LlmResponseGenerator {
    backend: Arc<dyn LlmBackend>,
    phrases: Arc<PhraseBook>,
    options: GenerationOptions,
    clock: Arc<dyn Clock>,
}

impl LlmResponseGenerator {
    pub fn new(backend: Arc<dyn LlmBackend>, phrases: Arc<PhraseBook>, options: GenerationOptions) -> Self {
        Self {
            backend,
            phrases,
            options,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for the time-of-day context
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn build_messages(&self, request: &GenerationRequest<'_>) -> Vec<Message> {
        let time = TimeOfDay::from_hour(self.clock.hour());
        let hint = request
            .next_question
            .unwrap_or(self.phrases.no_follow_up.as_str());

        PromptBuilder::new()
            .system_section(self.phrases.persona.as_str())
            .system_section(self.phrases.directive(request.directive))
            .system_section(self.phrases.time_context(time))
            .system_section(format!("{}: {}", self.phrases.follow_up_label, hint))
            .with_history(request.history)
            .user_message(request.utterance)
            .build()
    }
}

#[async_trait]
impl ResponseGenerator for LlmResponseGenerator {
    async fn generate(&self, request: GenerationRequest<'_>) -> String {
        let messages = self.build_messages(&request);

        match self.backend.generate(&messages, &self.options).await {
            Ok(result) if !result.text.trim().is_empty() => {
                if result.finish_reason == FinishReason::Length {
                    tracing::warn!(
                        directive = %request.directive,
                        max_tokens = self.options.max_tokens,
                        "Reply truncated at the token limit"
                    );
                }
                tracing::debug!(
                    directive = %request.directive,
                    tokens = result.tokens,
                    total_time_ms = result.total_time_ms,
                    "Response generated"
                );
                result.text.trim().to_string()
            }
            Ok(_) => {
                tracing::warn!(directive = %request.directive, "Model returned an empty reply");
                self.phrases.generator_fallback.clone()
            }
            Err(e) => {
                tracing::warn!(directive = %request.directive, error = %e, "Generation failed, using fallback");
                self.phrases.generator_fallback.clone()
            }
        }
    }
}
