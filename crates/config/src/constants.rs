//! Centralized constants for the survey agent
//!
//! Single source of truth for default values shared by the configuration
//! sections and the crates that fall back to them.

/// Dialogue limits
pub mod dialogue {
    /// Follow-ups allowed on one question before it is forced closed
    pub const MAX_FOLLOW_UPS: u32 = 2;

    /// Upper bound accepted by validation
    pub const MAX_FOLLOW_UPS_LIMIT: u32 = 10;

    /// Consecutive silent turns before the session ends
    pub const MAX_SILENT_ATTEMPTS: u32 = 5;

    /// Transcript entries passed to model calls
    pub const TRANSCRIPT_WINDOW: usize = 5;

    /// Consecutive failed turns before the session is abandoned
    pub const MAX_CONSECUTIVE_FAILURES: u32 = 10;
}

/// Service endpoints
pub mod endpoints {
    /// Groq's OpenAI-compatible API
    pub const GROQ_DEFAULT: &str = "https://api.groq.com/openai/v1";

    /// Ollama LLM endpoint
    pub const OLLAMA_DEFAULT: &str = "http://localhost:11434";

    /// Speech gateway sidecar
    pub const SPEECH_GATEWAY_DEFAULT: &str = "http://localhost:8090";
}

/// Model defaults
pub mod models {
    pub const GROQ_DEFAULT: &str = "mixtral-8x7b-32768";
    pub const OLLAMA_DEFAULT: &str = "llama3.1:8b";
}

/// Sampling parameters
pub mod sampling {
    pub const TEMPERATURE: f32 = 0.7;
    pub const TOP_P: f32 = 0.9;
    pub const MAX_TOKENS: u32 = 150;

    /// The classifier only needs a single word back
    pub const CLASSIFIER_MAX_TOKENS: u32 = 15;
}

/// Timeouts and retry policy
pub mod timeouts {
    /// LLM request timeout (seconds)
    pub const LLM_REQUEST_SECS: u64 = 30;

    /// Survey API request timeout (seconds)
    pub const API_REQUEST_SECS: u64 = 10;

    /// Longest a single capture may take (seconds)
    pub const LISTEN_SECS: u64 = 10;

    pub const LLM_MAX_RETRIES: u32 = 2;
    pub const API_MAX_RETRIES: u32 = 3;
    pub const API_INITIAL_BACKOFF_MS: u64 = 200;
}

/// Environment variables consulted when a secret is not in the config files
pub mod env_vars {
    pub const LLM_API_KEY: &str = "GROQ_API_KEY";
    pub const API_TOKEN: &str = "SURVEY_API_TOKEN";
}
