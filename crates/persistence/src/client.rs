//! REST survey API client
//!
//! Endpoints, relative to the configured base URL:
//! - `POST /conversations` opens a session and returns its `conversationId`
//! - `GET /questions` lists `{id, text, orderNumber}`
//! - `POST /answers` stores `{response, conversationId, questionId}`
//! - `PUT /conversations/{id}` closes a session with `{endTime, summary, sentiment}`
//!
//! Every call carries the bearer token when one is configured. Network
//! errors, timeouts and 5xx responses are retried with exponential backoff;
//! 4xx responses fail immediately.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use survey_agent_config::ApiConfig;
use survey_agent_core::{
    sort_questions, AnswerSubmission, AnswerSubmitter, Question, QuestionId, QuestionRepository,
    SessionClosing, SessionId,
};

use crate::PersistenceError;

/// Survey API client configuration
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    /// Bench (device) sessions are recorded against
    pub bench_id: Option<i64>,
    pub bearer_token: Option<String>,
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// First retry delay; doubles each retry
    pub initial_backoff: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            bench_id: None,
            bearer_token: None,
            timeout: Duration::from_secs(10),
            max_retries: 3,
            initial_backoff: Duration::from_millis(200),
        }
    }
}

impl ApiClientConfig {
    pub fn from_settings(settings: &ApiConfig) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            bench_id: settings.bench_id,
            bearer_token: settings.bearer_token.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
            max_retries: settings.max_retries,
            initial_backoff: Duration::from_millis(settings.initial_backoff_ms),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateConversationRequest {
    start_datetime: DateTime<Utc>,
    end_datetime: Option<DateTime<Utc>>,
    sentiment: Option<String>,
    summary: Option<String>,
    bench_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct CreateConversationResponse {
    #[serde(rename = "conversationId", alias = "id")]
    conversation_id: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerRequest<'a> {
    response: &'a str,
    conversation_id: serde_json::Value,
    question_id: QuestionId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CloseConversationRequest<'a> {
    end_time: DateTime<Utc>,
    summary: Option<&'a str>,
    sentiment: Option<&'a str>,
}

/// The API assigns numeric ids; send them back as numbers when they are
fn conversation_ref(id: &SessionId) -> serde_json::Value {
    id.as_str()
        .parse::<i64>()
        .map(serde_json::Value::from)
        .unwrap_or_else(|_| serde_json::Value::from(id.as_str()))
}

fn session_id_from(value: serde_json::Value) -> Result<SessionId, PersistenceError> {
    match value {
        serde_json::Value::Number(n) => Ok(SessionId::new(n.to_string())),
        serde_json::Value::String(s) if !s.is_empty() => Ok(SessionId::new(s)),
        other => Err(PersistenceError::InvalidResponse(format!(
            "Unusable conversation id: {}",
            other
        ))),
    }
}

/// REST survey API client
pub struct SurveyApiClient {
    config: ApiClientConfig,
    client: Client,
}

impl SurveyApiClient {
    pub fn new(config: ApiClientConfig) -> Result<Self, PersistenceError> {
        if config.base_url.trim().is_empty() {
            return Err(PersistenceError::Configuration("API base URL is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PersistenceError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_once(&self, request: RequestBuilder) -> Result<Response, PersistenceError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            Err(PersistenceError::Server {
                status: status.as_u16(),
                body,
            })
        } else {
            Err(PersistenceError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Send a request, retrying transient failures
    async fn send<F>(&self, operation: &'static str, build: F) -> Result<Response, PersistenceError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut backoff = self.config.initial_backoff;
        let mut attempt = 0;

        loop {
            match self.send_once(build()).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        operation,
                        attempt,
                        max_retries = self.config.max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Survey API request failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                Err(e) => {
                    tracing::error!(operation, error = %e, "Survey API request failed");
                    return Err(e);
                }
            }
        }
    }
}

#[async_trait]
impl QuestionRepository for SurveyApiClient {
    async fn fetch_questions(&self) -> survey_agent_core::Result<Vec<Question>> {
        let url = self.url("/questions");
        let response = self.send("fetch_questions", || self.client.get(&url)).await?;

        let mut questions: Vec<Question> = response
            .json()
            .await
            .map_err(|e| PersistenceError::InvalidResponse(e.to_string()))?;
        sort_questions(&mut questions);

        tracing::info!(count = questions.len(), "Fetched questions");
        Ok(questions)
    }
}

#[async_trait]
impl AnswerSubmitter for SurveyApiClient {
    async fn open_session(&self) -> survey_agent_core::Result<SessionId> {
        let url = self.url("/conversations");
        let body = CreateConversationRequest {
            start_datetime: Utc::now(),
            end_datetime: None,
            sentiment: None,
            summary: None,
            bench_id: self.config.bench_id,
        };

        let response = self
            .send("open_session", || self.client.post(&url).json(&body))
            .await?;
        let created: CreateConversationResponse = response
            .json()
            .await
            .map_err(|e| PersistenceError::InvalidResponse(e.to_string()))?;
        let session_id = session_id_from(created.conversation_id)?;

        tracing::info!(session_id = %session_id, bench_id = ?self.config.bench_id, "Conversation opened");
        Ok(session_id)
    }

    async fn submit_answer(&self, submission: &AnswerSubmission) -> survey_agent_core::Result<()> {
        let url = self.url("/answers");
        let body = AnswerRequest {
            response: &submission.response,
            conversation_id: conversation_ref(&submission.session_id),
            question_id: submission.question_id,
        };

        self.send("submit_answer", || self.client.post(&url).json(&body))
            .await?;

        tracing::debug!(
            session_id = %submission.session_id,
            question_id = submission.question_id,
            "Answer stored"
        );
        Ok(())
    }

    async fn finalize_session(&self, closing: &SessionClosing) -> survey_agent_core::Result<()> {
        let url = self.url(&format!("/conversations/{}", closing.session_id));
        let body = CloseConversationRequest {
            end_time: closing.ended_at,
            summary: closing.summary.as_deref(),
            sentiment: closing.sentiment.as_deref(),
        };

        self.send("finalize_session", || self.client.put(&url).json(&body))
            .await?;

        tracing::info!(session_id = %closing.session_id, "Conversation closed");
        Ok(())
    }
}
