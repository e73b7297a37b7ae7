//! Generation backend trait and the Ollama-style HTTP implementation.

use crate::error::{LlmError, LlmResult};
use async_trait::async_trait;
use rf_core::config::BackendConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which artifact half a prompt is generating.
///
/// Carried for logging and to allow per-mode model selection later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    /// Test-case description prompt
    TestCase,
    /// SQL script prompt
    Sql,
}

impl fmt::Display for GenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenMode::TestCase => write!(f, "test_case"),
            GenMode::Sql => write!(f, "sql"),
        }
    }
}

/// Opaque text-completion service.
///
/// Implementations must be Send + Sync for use across pipeline workers.
/// A well-formed-but-unusable response (e.g. empty text) is returned as-is;
/// rejecting it is the validator's job.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Send `prompt` and return the complete raw response text.
    async fn generate(&self, prompt: &str, mode: GenMode) -> LlmResult<String>;
}

/// Ollama-style HTTP backend (`POST <url>/api/generate`, non-streaming).
pub struct OllamaBackend {
    http: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    max_attempts: u32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f64,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaBackend {
    /// Build a backend from config. Fails only if the HTTP client cannot
    /// be constructed.
    pub fn new(config: &BackendConfig) -> LlmResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::RequestFailed {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_attempts: config.max_attempts.max(1),
        })
    }

    async fn request_once(&self, prompt: &str) -> Result<String, AttemptError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                // Connection refused and timeouts are transient; anything else
                // at the transport level is treated the same way.
                AttemptError::Transient(e.to_string())
            })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(AttemptError::Transient(format!("server error: {status}")));
        }
        if !status.is_success() {
            return Err(AttemptError::Fatal(LlmError::RequestFailed {
                message: format!("backend returned {status}"),
            }));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            AttemptError::Fatal(LlmError::InvalidResponse {
                message: e.to_string(),
            })
        })?;

        Ok(parsed.response)
    }
}

/// Transport attempt outcome: transient failures are retried, fatal ones
/// surface immediately.
enum AttemptError {
    Transient(String),
    Fatal(LlmError),
}

/// Linear backoff, capped at 10 seconds.
///
/// `attempt` is 1-based; the delay applies before the *next* attempt.
fn backoff_delay(attempt: u32) -> Duration {
    const STEP_MS: u64 = 500;
    const CAP_MS: u64 = 10_000;
    Duration::from_millis((u64::from(attempt) * STEP_MS).min(CAP_MS))
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    async fn generate(&self, prompt: &str, mode: GenMode) -> LlmResult<String> {
        let mut last_failure = String::new();

        for attempt in 1..=self.max_attempts {
            log::debug!(
                "generation call mode={} model={} attempt={}/{}",
                mode,
                self.model,
                attempt,
                self.max_attempts
            );

            match self.request_once(prompt).await {
                Ok(text) => return Ok(text),
                Err(AttemptError::Fatal(err)) => return Err(err),
                Err(AttemptError::Transient(message)) => {
                    log::warn!(
                        "transient backend failure (mode={}, attempt {}/{}): {}",
                        mode,
                        attempt,
                        self.max_attempts,
                        message
                    );
                    last_failure = message;
                    if attempt < self.max_attempts {
                        tokio::time::sleep(backoff_delay(attempt)).await;
                    }
                }
            }
        }

        Err(LlmError::BackendUnavailable {
            attempts: self.max_attempts,
            message: last_failure,
        })
    }
}
