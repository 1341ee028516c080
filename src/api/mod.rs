//! Slack Web API module
//!
//! A thin, rate-limited client over the handful of Web API methods needed to
//! find and remove a user's own content in one conversation.

pub mod client;
pub mod constants;
pub mod error;
pub mod methods;
pub mod models;
pub mod resilience;

pub use client::SlackClient;
pub use error::SlackError;
pub use methods::ApiMethod;
pub use models::{Conversation, File, Identity, Message, Paging, User};
pub use resilience::{RateLimitConfig, RateLimiter, RateLimiterStats, RateLimiters, Tier};
