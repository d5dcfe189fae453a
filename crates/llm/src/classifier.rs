//! Response classifier adapter
//!
//! Asks the model to judge an utterance against the current question and
//! reduces the free-text reply to one [`ClassificationLabel`]. Any failure
//! degrades to `Incomplete`; nothing is propagated to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use survey_agent_config::PhraseBook;
use survey_agent_core::{ClassificationLabel, ResponseClassifier, Turn};

use crate::backend::{GenerationOptions, LlmBackend};
use crate::prompt::PromptBuilder;

/// Whole-word label markers, canonical names first, with an optional
/// `not`/`niet` in front. At any position the leftmost alternative wins, so
/// `off-topic` is preferred over `off`.
static LABEL_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(not|niet)\s+)?(end_requested|off[_ -]?topic|incomplete|complete|einde|yes|ja|nee|no|off|end)\b",
    )
    .expect("label marker pattern is valid")
});

/// Reduce a model reply to a label.
///
/// The reply is lower-cased and scanned for the first recognised marker,
/// covering both the canonical names and the Yes/No/Off/End (Ja/Nee/Off/Einde)
/// vocabulary of the evaluator prompt. No marker, or a negated one such as
/// `not complete`, means `Incomplete`.
pub fn normalize_label(reply: &str) -> ClassificationLabel {
    let lowered = reply.to_lowercase();
    let Some(caps) = LABEL_MARKER.captures(&lowered) else {
        return ClassificationLabel::Incomplete;
    };
    if caps.get(1).is_some() {
        return ClassificationLabel::Incomplete;
    }

    match &caps[2] {
        "complete" | "yes" | "ja" => ClassificationLabel::Complete,
        "end_requested" | "end" | "einde" => ClassificationLabel::EndRequested,
        "incomplete" | "no" | "nee" => ClassificationLabel::Incomplete,
        _ => ClassificationLabel::OffTopic,
    }
}

/// Classifier backed by a chat model
pub struct LlmResponseClassifier {
    backend: Arc<dyn LlmBackend>,
    phrases: Arc<PhraseBook>,
    options: GenerationOptions,
}

impl LlmResponseClassifier {
    pub fn new(backend: Arc<dyn LlmBackend>, phrases: Arc<PhraseBook>, max_tokens: u32) -> Self {
        Self {
            backend,
            phrases,
            options: GenerationOptions::deterministic(max_tokens),
        }
    }

    fn framed_input(&self, question: &str, utterance: &str) -> String {
        format!(
            "{}: {}\n{}: {}",
            self.phrases.question_label, question, self.phrases.response_label, utterance
        )
    }
}

#[async_trait]
impl ResponseClassifier for LlmResponseClassifier {
    async fn classify(&self, utterance: &str, history: &[Turn], question: &str) -> ClassificationLabel {
        let messages = PromptBuilder::new()
            .system_section(self.phrases.evaluator_role.as_str())
            .with_history(history)
            .user_message(self.framed_input(question, utterance))
            .build();

        match self.backend.generate(&messages, &self.options).await {
            Ok(result) => {
                let label = normalize_label(&result.text);
                tracing::debug!(
                    model = self.backend.model_name(),
                    reply = %result.text.trim(),
                    label = %label,
                    "Utterance classified"
                );
                label
            }
            Err(e) => {
                tracing::warn!(error = %e, "Classifier call failed, defaulting to incomplete");
                ClassificationLabel::Incomplete
            }
        }
    }
}
