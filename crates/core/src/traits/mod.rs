//! Port traits for the survey agent
//!
//! Every external collaborator of the dialogue engine sits behind one of
//! these traits so that backends can be swapped from configuration and
//! replaced with scripted mocks in tests.
//!
//! # Trait Hierarchy
//!
//! ```text
//! Speech:
//!   - SpeechToText: capture one utterance (empty on silence)
//!   - TextToSpeech: speak and wait
//!
//! Language Models:
//!   - ResponseClassifier: label an utterance against the current question
//!   - ResponseGenerator: produce the next thing to say for a directive
//!
//! Survey Store:
//!   - QuestionRepository: ordered question list, fetched once per session
//!   - AnswerSubmitter: open a session, submit answers, finalize
//! ```

mod llm;
mod speech;
mod survey;

pub use llm::{GenerationRequest, ResponseClassifier, ResponseGenerator};
pub use speech::{SpeechToText, TextToSpeech};
pub use survey::{AnswerSubmitter, QuestionRepository};
