use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::config::{GroqConfig, Timeouts};

/// Shown for every call when the client could not be built at startup.
pub const UNAVAILABLE_NOTICE: &str = "Error: Groq API client not initialized";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Credential missing or the HTTP client failed to build.
    #[error("Groq API client not initialized: {0}")]
    ClientUnavailable(String),

    /// Transport failure, including timeouts.
    #[error("request to Groq failed: {0}")]
    Request(String),

    #[error("Groq API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not parse Groq response: {0}")]
    Parse(String),

    #[error("Groq response contained no message text")]
    EmptyResponse,
}

/// Turns any completion failure into a sentence the user can read.
pub fn render_completion_error(err: &CompletionError) -> String {
    match err {
        CompletionError::ClientUnavailable(_) => UNAVAILABLE_NOTICE.to_string(),
        other => format!("I apologize, but I encountered an error: {}", other),
    }
}

/// Model id and sampling settings for one persona.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ModelSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn nutritionist(config: &GroqConfig) -> Self {
        Self::new(config.nutrition_model.clone())
    }

    pub fn virtual_doctor(config: &GroqConfig) -> Self {
        Self::new(config.symptom_model.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// One remote round trip: system + user message in, generated text out.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

pub struct GroqClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GroqClient {
    pub fn new(api_key: String, base_url: &str, timeouts: Timeouts) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| CompletionError::ClientUnavailable(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &GroqConfig) -> Result<Self, CompletionError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            CompletionError::ClientUnavailable(format!("{} is not set", crate::config::API_KEY_VAR))
        })?;
        Self::new(api_key, &config.base_url, config.timeouts)
    }
}

#[async_trait]
impl ChatBackend for GroqClient {
    async fn chat(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let api_url = format!("{}/chat/completions", self.base_url);

        let body = ChatRequest {
            model: &request.model,
            messages: [
                WireMessage { role: "system", content: &request.system },
                WireMessage { role: "user", content: &request.user },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(model = %request.model, max_tokens = request.max_tokens, "Sending chat completion request");

        let response = self
            .client
            .post(&api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        if !status.is_success() {
            error!("API request failed with status {}: {}", status, text);
            return Err(CompletionError::Status { status: status.as_u16(), body: text });
        }

        debug!("Received chat completion response ({} bytes)", text.len());
        parse_chat_response(&text)
    }
}

// Wire types for the OpenAI-compatible /chat/completions endpoint.

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [WireMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn parse_chat_response(text: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse =
        serde_json::from_str(text).map_err(|e| CompletionError::Parse(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyResponse)
}

/// The single completion entry point used by the front end.
///
/// Built once at startup. If no backend could be built the adapter stays in
/// degraded mode and every call yields [`UNAVAILABLE_NOTICE`].
pub struct CompletionAdapter {
    backend: Option<Box<dyn ChatBackend>>,
    unavailable_reason: Option<String>,
}

impl CompletionAdapter {
    pub fn from_config(config: &GroqConfig) -> Self {
        match GroqClient::from_config(config) {
            Ok(client) => Self::with_backend(Box::new(client)),
            Err(e) => {
                warn!("Groq client unavailable, answers will be a notice only: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn with_backend(backend: Box<dyn ChatBackend>) -> Self {
        Self { backend: Some(backend), unavailable_reason: None }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self { backend: None, unavailable_reason: Some(reason.into()) }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn try_complete(
        &self,
        system: &str,
        user: &str,
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        let backend = match &self.backend {
            Some(backend) => backend,
            None => {
                let reason = self.unavailable_reason.clone().unwrap_or_default();
                return Err(CompletionError::ClientUnavailable(reason));
            }
        };

        let request = CompletionRequest {
            system: system.to_string(),
            user: user.to_string(),
            model: model.to_string(),
            temperature,
            max_tokens,
        };

        backend.chat(&request).await
    }

    /// Like [`Self::try_complete`], but always returns renderable text.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> String {
        match self.try_complete(system, user, model, temperature, max_tokens).await {
            Ok(text) => text,
            Err(e) => {
                if !matches!(e, CompletionError::ClientUnavailable(_)) {
                    warn!(model, "Completion failed: {}", e);
                }
                render_completion_error(&e)
            }
        }
    }

    pub async fn answer(&self, system: &str, user: &str, settings: &ModelSettings) -> String {
        self.complete(system, user, &settings.model, settings.temperature, settings.max_tokens)
            .await
    }
}

#[cfg(test)]
#[path = "groq_client_test.rs"]
mod tests;
