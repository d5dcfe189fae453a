//! Speech traits

use crate::Result;
use async_trait::async_trait;

/// Speech-to-Text interface
///
/// Implementations:
/// - `HttpSpeechGateway` - sidecar service doing capture and transcription
/// - `ConsoleSpeech` - reads typed lines from stdin
///
/// # Example
///
/// ```ignore
/// let stt: Arc<dyn SpeechToText> = Arc::new(ConsoleSpeech::new());
/// let said = stt.listen().await?;
/// if said.trim().is_empty() {
///     // silence
/// }
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    /// Capture and transcribe one utterance
    ///
    /// Blocks until the respondent finishes speaking or the capture window
    /// closes. Returns an empty (or whitespace-only) string on silence and
    /// an error only when capture itself failed.
    async fn listen(&self) -> Result<String>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Text-to-Speech interface
#[async_trait]
pub trait TextToSpeech: Send + Sync + 'static {
    /// Speak the text and return once playback has finished
    async fn speak(&self, text: &str) -> Result<()>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}
