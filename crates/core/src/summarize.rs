//! AI commentary on audit reports.
//!
//! [`Summarizer`] embeds a report in a fixed instruction and sends it as a
//! single user message to an OpenAI-compatible chat-completion endpoint
//! (Groq by default). One request per report: no streaming, no retries, no
//! conversation state.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::report::error_chain;
use crate::{AuditError, Result};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Default chat-completion API root.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default hosted model.
pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";

/// Default output token budget.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Returned by [`Summarizer::analyze`] when the API call fails.
pub const ANALYSIS_FAILED: &str = "Error occurred during AI analysis.";

/// Default timeout for chat-completion requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

const PROMPT_PREFIX: &str = "You are an expert in SEO analysis.\n\
I will provide you with a [SEO_REPORT]\n\
and your task is to analyze and return a list of optimizations\n\
[SEO_REPORT]: ";

/// Credentials and model settings for the chat-completion endpoint.
#[derive(Clone)]
pub struct SummarizerConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl SummarizerConfig {
    /// Settings for `api_key` with the default endpoint, model and token budget.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Reads the API key from `GROQ_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::ConfigError`] when the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(AuditError::ConfigError(format!("{API_KEY_ENV} is not set"))),
        }
    }
}

impl std::fmt::Debug for SummarizerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizerConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Builds the user message for a report.
pub fn build_prompt<T: Serialize>(report: &T) -> Result<String> {
    let json = serde_json::to_string(report)?;
    Ok(format!("{PROMPT_PREFIX}{json}\n"))
}

/// Client for the chat-completion endpoint, built once per run.
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: Client,
    config: SummarizerConfig,
}

impl Summarizer {
    /// Creates a summarizer from explicit settings.
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(AuditError::HttpError)?;

        Ok(Self { client, config })
    }

    /// The model requests are sent to.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Asks the model to analyze `report` and returns its reply.
    ///
    /// # Errors
    ///
    /// [`AuditError::HttpError`] for transport failures, [`AuditError::Api`]
    /// for non-success statuses, and [`AuditError::UnexpectedResponse`] when
    /// the reply has no usable message.
    #[instrument(skip(self, report), fields(model = %self.config.model), level = "debug")]
    pub async fn summarize<T: Serialize>(&self, report: &T) -> Result<String> {
        let prompt = build_prompt(report)?;
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage { role: "user", content: &prompt }],
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        debug!(prompt_bytes = prompt.len(), "sending chat completion request");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(AuditError::Api { status: status.as_u16(), body: text });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| AuditError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AuditError::UnexpectedResponse("response contained no message".to_string()))
    }

    /// Like [`summarize`](Self::summarize), but never fails.
    ///
    /// Errors are logged and replaced with [`ANALYSIS_FAILED`].
    pub async fn analyze<T: Serialize>(&self, report: &T) -> String {
        match self.summarize(report).await {
            Ok(analysis) => analysis,
            Err(err) => {
                error!(error = %error_chain(&err), "AI analysis failed");
                ANALYSIS_FAILED.to_string()
            }
        }
    }
}
