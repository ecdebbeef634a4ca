pub mod capability;
pub mod config;
pub mod engine;
pub mod fallback;
pub mod notify;
pub mod openai_api_agent;
pub mod postprocess;
pub mod prompt;

pub use capability::{CapabilityError, CompletionAgent, CompletionRequest};
pub use engine::{ChatEngine, TurnResponse};
pub use notify::{NotificationEvent, NotificationSink, TracingSink};
pub use openai_api_agent::OpenAiApiAgent;
