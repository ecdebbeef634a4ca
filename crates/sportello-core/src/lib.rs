pub mod classify;
pub mod config;
pub mod conversation;
pub mod decision;
pub mod error;
pub mod message;
pub mod signals;

// Re-export common error type
pub use error::SportelloError;

pub use classify::{classify, detect_intent, detect_sector, detect_sentiment, detect_urgency};
pub use config::{ContactIdentity, EngineConfig, UrgencyThresholds};
pub use conversation::ConversationState;
pub use decision::{ResponseAction, ResponseDecision, ResponseFlags};
pub use message::{ChatMessage, MessageRole, TurnRecord};
pub use signals::{
    Intent, Sector, SectorGuess, Sentiment, SentimentGuess, SignalSet, Urgency, UrgencyLevel,
};
