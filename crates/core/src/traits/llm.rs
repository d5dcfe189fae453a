//! Language model adapter traits
//!
//! Both adapters are infallible at this boundary: the classifier degrades to
//! [`ClassificationLabel::Incomplete`] and the generator to a fixed fallback
//! sentence, so the dialogue engine never sees a model error.

use crate::conversation::Turn;
use crate::label::{ClassificationLabel, Directive};
use async_trait::async_trait;

/// Labels a respondent utterance against the question being asked
#[async_trait]
pub trait ResponseClassifier: Send + Sync + 'static {
    /// Classify `utterance` given the bounded `history` and the current
    /// `question` text.
    async fn classify(&self, utterance: &str, history: &[Turn], question: &str)
        -> ClassificationLabel;
}

/// Everything the generator needs for one reply
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Which instruction to follow
    pub directive: Directive,
    /// What the respondent just said
    pub utterance: &'a str,
    /// Bounded transcript window, oldest first
    pub history: &'a [Turn],
    /// Question the reply should lead into, if any
    pub next_question: Option<&'a str>,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(directive: Directive, utterance: &'a str, history: &'a [Turn]) -> Self {
        Self {
            directive,
            utterance,
            history,
            next_question: None,
        }
    }

    /// Set the follow-up question hint
    pub fn with_next_question(mut self, question: Option<&'a str>) -> Self {
        self.next_question = question;
        self
    }
}

/// Produces the next spoken utterance
#[async_trait]
pub trait ResponseGenerator: Send + Sync + 'static {
    /// Generate text to speak. Never fails; returns a fallback apology when
    /// the underlying model cannot be reached.
    async fn generate(&self, request: GenerationRequest<'_>) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct EchoGenerator;

    #[async_trait]
    impl ResponseGenerator for EchoGenerator {
        async fn generate(&self, request: GenerationRequest<'_>) -> String {
            format!(
                "{}:{}:{}",
                request.directive,
                request.utterance,
                request.next_question.unwrap_or("-")
            )
        }
    }

    #[tokio::test]
    async fn test_generation_request_builder() {
        let history = vec![Turn::question("Q1")];
        let generator: Arc<dyn ResponseGenerator> = Arc::new(EchoGenerator);

        let request = GenerationRequest::new(Directive::Advance, "fine", &history)
            .with_next_question(Some("Q2"));
        assert_eq!(generator.generate(request).await, "advance:fine:Q2");

        let request = GenerationRequest::new(Directive::Probe, "hm", &history);
        assert_eq!(request.history.len(), 1);
        assert_eq!(generator.generate(request).await, "probe:hm:-");
    }
}
