use std::path::Path;

use secrecy::SecretString;

use crate::Config;

const KEY_ENV_VAR: &str = "OPENAI_API_KEY";

pub(crate) fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let path = path.as_ref();

    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        log::debug!("No configuration file at {}, using defaults", path.display());
        Config::default()
    };

    if config.api.key.is_none()
        && let Ok(key) = std::env::var(KEY_ENV_VAR)
        && !key.is_empty()
    {
        log::debug!("Using API key from {KEY_ENV_VAR}");
        config.api.key = Some(SecretString::from(key));
    }

    Ok(config)
}
