use thiserror::Error;

/// Completion client errors.
///
/// Three kinds, so callers can pick different fallback behavior: a missing
/// key is user-actionable, a server failure may warrant a manual retry, and
/// a decode failure usually means showing canned default text instead.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key is configured.
    #[error("API key is missing. Add one under [api] in the configuration or set OPENAI_API_KEY.")]
    MissingApiKey,

    /// The endpoint rejected the call after the fallback attempt, or the
    /// connection itself failed.
    #[error("Server error: {0}")]
    Server(String),

    /// The response body did not match the expected JSON shape, even after
    /// the balanced-object extraction fallback.
    #[error("Failed to decode server response: {0}")]
    Decode(String),
}
