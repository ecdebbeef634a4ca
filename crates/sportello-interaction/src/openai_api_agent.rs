//! OpenAiApiAgent - Direct REST API implementation for OpenAI-compatible
//! chat completion endpoints.
//!
//! Configuration priority: ~/.config/sportello/secret.json > environment
//! variables. The agent performs exactly one HTTP attempt per call; retry
//! policy belongs to the caller, and the engine's policy is "never".

use crate::capability::{CapabilityError, CompletionAgent, CompletionRequest};
use crate::config::load_secret_config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use sportello_core::{ChatMessage, MessageRole};
use std::env;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Agent implementation that talks to an OpenAI-compatible HTTP API.
#[derive(Clone)]
pub struct OpenAiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Loads configuration from ~/.config/sportello/secret.json or
    /// environment variables.
    ///
    /// Priority:
    /// 1. ~/.config/sportello/secret.json
    /// 2. Environment variables (OPENAI_API_KEY, OPENAI_MODEL_NAME)
    ///
    /// Model name defaults to `gpt-4o-mini` if not specified.
    pub fn try_from_env() -> Result<Self, CapabilityError> {
        if let Ok(secret_config) = load_secret_config() {
            if let Some(openai_config) = secret_config.openai {
                let model = openai_config
                    .model_name
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string());
                return Ok(Self::new(openai_config.api_key, model));
            }
        }

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| CapabilityError::Upstream {
            status: None,
            message: "OPENAI_API_KEY not found in ~/.config/sportello/secret.json or environment variables".to_string(),
            is_retryable: false,
        })?;

        let model = env::var("OPENAI_MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_body(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages: Vec<WireMessage> = Vec::with_capacity(request.messages.len() + 1);

        // Sector-aware agents get the hint as an extra system line so the
        // upstream model sees it even when the caller's prompt omitted it.
        if let Some(hint) = &request.sector_hint {
            messages.push(WireMessage {
                role: "system",
                content: format!("Settore cliente rilevato: {hint}"),
            });
        }

        messages.extend(request.messages.iter().map(wire_message));

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, CapabilityError> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| CapabilityError::Upstream {
                status: None,
                message: format!("completion request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            CapabilityError::InvalidResponse(format!("failed to parse completion response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CompletionAgent for OpenAiApiAgent {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CapabilityError> {
        let body = self.build_body(&request);
        self.send_request(&body).await
    }
}

fn wire_message(message: &ChatMessage) -> WireMessage {
    let role = match message.role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    };
    WireMessage {
        role,
        content: message.content.clone(),
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, CapabilityError> {
    response
        .choices
        .into_iter()
        .find_map(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| {
            CapabilityError::InvalidResponse(
                "completion response contained no text".to_string(),
            )
        })
}

fn map_http_error(
    status: StatusCode,
    body: String,
    retry_after: Option<Duration>,
) -> CapabilityError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    let message = match retry_after {
        Some(delay) => format!("{message} (retry after {}s)", delay.as_secs()),
        None => message,
    };

    CapabilityError::Upstream {
        status: Some(status.as_u16()),
        message,
        is_retryable,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    // Retry-After HTTP-date parsing is omitted for simplicity
    None
}
