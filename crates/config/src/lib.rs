//! Icebreaker configuration structures to map the icebreaker.toml configuration.

#![deny(missing_docs)]

mod api;
mod loader;

use std::path::Path;

use serde::Deserialize;

pub use api::ApiConfig;

/// Main configuration structure for the icebreaker application.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Completion API configuration settings.
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// A missing file yields the default configuration. In both cases, when no
    /// API key is configured the `OPENAI_API_KEY` environment variable is
    /// consulted as a fallback.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        loader::load(path)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.api.base_url, "https://api.openai.com/v1");
        assert_eq!(config.api.model, "4o-nano");
        assert!(config.api.key.is_none());
    }

    #[test]
    fn full_api_section() {
        let config: Config = toml::from_str(indoc! {r#"
            [api]
            base_url = "http://127.0.0.1:9090/v1"
            key = "sk-test"
            model = "gpt-4o-mini"
        "#})
        .unwrap();

        assert_eq!(config.api.base_url, "http://127.0.0.1:9090/v1");
        assert_eq!(config.api.model, "gpt-4o-mini");
        assert_eq!(config.api.key.unwrap().expose_secret(), "sk-test");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = toml::from_str::<Config>(indoc! {r#"
            [api]
            api_token = "sk-test"
        "#});

        assert!(result.is_err());
    }
}
