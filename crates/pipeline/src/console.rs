//! Console speech backend
//!
//! Reads one line per utterance and prints what the agent says. An empty
//! line counts as silence; end of input is reported as a capture error.

use async_trait::async_trait;
use survey_agent_core::{Error, Result, SpeechToText, TextToSpeech};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;

/// Text-mode stand-in for a microphone and speaker
pub struct ConsoleSpeech<R = BufReader<Stdin>, W = Stdout> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl ConsoleSpeech {
    /// Console on the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> ConsoleSpeech<R, W>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    /// Give back the reader and writer
    pub fn into_parts(self) -> (R, W) {
        (self.input.into_inner(), self.output.into_inner())
    }

    async fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut output = self.output.lock().await;
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await
    }
}

#[async_trait]
impl<R, W> SpeechToText for ConsoleSpeech<R, W>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn listen(&self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(|e| Error::Capture(e.to_string()))?;

        if read == 0 {
            return Err(Error::Capture("input closed".to_string()));
        }

        Ok(line.trim().to_string())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[async_trait]
impl<R, W> TextToSpeech for ConsoleSpeech<R, W>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn speak(&self, text: &str) -> Result<()> {
        self.write_line(&format!("AI: {}", text))
            .await
            .map_err(|e| Error::Playback(e.to_string()))
    }

    fn name(&self) -> &str {
        "console"
    }
}
