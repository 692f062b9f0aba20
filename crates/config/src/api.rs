//! Completion API configuration.

use secrecy::SecretString;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "4o-nano";

/// Settings for the remote chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the completion API, without the `/chat/completions` suffix.
    pub base_url: String,

    /// Bearer token for the completion API.
    ///
    /// When unset, `OPENAI_API_KEY` is read at load time. Calls fail fast
    /// without a key; no request leaves the process unauthenticated.
    pub key: Option<SecretString>,

    /// Model requested on the first attempt of every call.
    pub model: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}
