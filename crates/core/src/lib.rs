//! Core traits and types for the survey agent
//!
//! This crate provides foundational types used across all other crates:
//! - Questions and the answers submitted for them
//! - Conversation turns and the bounded transcript handed to model calls
//! - The closed classification label taxonomy and directive prompt variants
//! - Port traits for every external collaborator (speech, models, survey API)
//! - Error types

pub mod conversation;
pub mod error;
pub mod label;
pub mod language;
pub mod question;
pub mod session;
pub mod traits;

pub use conversation::{Transcript, Turn, TurnRole};
pub use error::{Error, Result};
pub use label::{ClassificationLabel, Directive};
pub use language::Language;
pub use question::{sort_questions, Question, QuestionId};
pub use session::{AnswerSubmission, SessionClosing, SessionId};

pub use traits::{
    AnswerSubmitter, GenerationRequest, QuestionRepository, ResponseClassifier,
    ResponseGenerator, SpeechToText, TextToSpeech,
};
