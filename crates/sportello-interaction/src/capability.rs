//! The Remote AI Capability seam.
//!
//! The engine only sees this trait; concrete agents (HTTP clients, mocks)
//! live behind it. A capability call is a single attempt; the engine never
//! retries, it falls back to canned text instead.

use async_trait::async_trait;
use sportello_core::ChatMessage;
use thiserror::Error;

/// Ways a capability call can fail. All of them are recovered by the engine;
/// none ever reach the end user.
#[derive(Error, Debug, Clone)]
pub enum CapabilityError {
    /// The call did not complete within the configured deadline.
    #[error("capability call timed out")]
    Timeout,

    /// The upstream service answered with an error or was unreachable.
    #[error("upstream error: {message}")]
    Upstream {
        /// HTTP status, when one was received.
        status: Option<u16>,
        message: String,
        /// Whether a later attempt could plausibly succeed (429/5xx).
        is_retryable: bool,
    },

    /// The upstream answered 2xx but the payload was unusable.
    #[error("invalid capability response: {0}")]
    InvalidResponse(String),
}

/// One completion request: ordered messages plus generation options.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Detected customer sector, forwarded so sector-aware agents can adapt.
    pub sector_hint: Option<String>,
}

/// An opaque, possibly-slow, possibly-failing completion service.
#[async_trait]
pub trait CompletionAgent: Send + Sync {
    /// Produces the assistant text for the given request.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CapabilityError>;
}
