mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = load_file(&config_path).await?;
    apply_overrides(&mut config, |key| env::var(key).ok())?;
    validate(&config)?;

    Ok(config)
}

/// Reads a YAML config file, falling back to defaults when it does not exist.
pub async fn load_file(config_path: &str) -> Result<Config> {
    if !Path::new(config_path).exists() {
        debug!("No configuration file at {}, using defaults", config_path);
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Applies environment-style overrides on top of a loaded config.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("UPSTREAM_URL") {
        config.upstream.url = url;
    }
    if let Some(value) = lookup("UPSTREAM_TIMEOUT_MS") {
        config.upstream.timeout_ms = parse_override("UPSTREAM_TIMEOUT_MS", &value)?;
    }

    let generation = &mut config.upstream.generation;
    if let Some(value) = lookup("MAX_NEW_TOKENS") {
        generation.max_new_tokens = parse_override("MAX_NEW_TOKENS", &value)?;
    }
    if let Some(value) = lookup("DO_SAMPLE") {
        generation.do_sample = parse_override("DO_SAMPLE", &value.to_ascii_lowercase())?;
    }
    if let Some(value) = lookup("TEMPERATURE") {
        generation.temperature = parse_override("TEMPERATURE", &value)?;
    }
    if let Some(value) = lookup("TOP_P") {
        generation.top_p = parse_override("TOP_P", &value)?;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("Invalid value for {}: '{}'", key, value)))
}

pub fn validate(config: &Config) -> Result<()> {
    let upstream = &config.upstream;

    if upstream.url.is_empty() {
        return Err(Error::config(
            "upstream.url is required (set it in the config file or UPSTREAM_URL)",
        ));
    }
    let url = reqwest::Url::parse(&upstream.url)
        .map_err(|e| Error::config(format!("Invalid upstream.url '{}': {}", upstream.url, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "Unsupported upstream.url scheme: {}",
            url.scheme()
        )));
    }

    if upstream.timeout_ms == 0 {
        return Err(Error::config("upstream.timeout_ms must be greater than 0"));
    }

    let generation = &upstream.generation;
    if generation.max_new_tokens == 0 {
        return Err(Error::config("max_new_tokens must be greater than 0"));
    }
    if !generation.temperature.is_finite() || generation.temperature < 0.0 {
        return Err(Error::config("temperature must be a non-negative number"));
    }
    if !(generation.top_p > 0.0 && generation.top_p <= 1.0) {
        return Err(Error::config("top_p must be in (0, 1]"));
    }

    Ok(())
}
