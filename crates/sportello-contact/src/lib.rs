pub mod rate_limit;
pub mod response;
pub mod validation;

pub use rate_limit::{CounterStore, InMemoryCounterStore, RateLimitDecision, RateLimiter};
pub use response::{FormOutcome, FormResponse};
pub use validation::{ContactSubmission, ValidationIssue};
