//! Client for the conversation-practice completion API.
//!
//! The crate wraps an OpenAI-style chat-completions endpoint and exposes the
//! operations the app is built on: spark generation, streamed training
//! replies, post-session feedback, mid-conversation repair suggestions, and
//! the daily tip/topics. Alongside the client live the pure pieces the same
//! flows need: the safety filter, the preset catalogs, transcript and metrics
//! types, and growth analysis.
//!
//! Every call is independent; the client keeps no state between calls other
//! than its configuration and credential. Requests attempt the configured
//! model first and retry exactly once with a fallback model on a non-2xx
//! response before giving up.

mod client;
mod decode;
mod error;
mod messages;
mod model;
mod prompt;
mod sse;

pub mod growth;
pub mod presets;
pub mod safety;

pub use client::{Client, ReplyStream};
pub use error::Error;
pub use messages::{ChatMessage, Role};
pub use model::{
    DialogueTurn, FeedbackSummary, RepairKind, Spark, SparkContext, SparkKind, TrainingMetrics, TurnRole,
};

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
