use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Fails at startup if the provider API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub gemini_base_url: String,
    pub llm_timeout: Duration,
    /// Total attempts per provider call. 1 means single-shot.
    pub llm_max_attempts: u32,
    pub default_location: String,
    /// Sessions idle longer than this are discarded.
    pub session_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_key: require_env("API_KEY")?,
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            llm_timeout: Duration::from_secs(
                parse_env("LLM_TIMEOUT_SECS", 120)
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            llm_max_attempts: parse_env("LLM_MAX_ATTEMPTS", 1_u32)
                .context("LLM_MAX_ATTEMPTS must be a positive integer")?
                .max(1),
            default_location: std::env::var("DEFAULT_LOCATION")
                .unwrap_or_else(|_| "New Jersey".to_string()),
            session_ttl: Duration::from_secs(
                parse_env("SESSION_TTL_SECS", 1800_u64)
                    .context("SESSION_TTL_SECS must be a whole number of seconds")?
                    .max(1),
            ),
            port: parse_env("PORT", 8080_u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            llm_timeout: Duration::from_secs(120),
            llm_max_attempts: 1,
            default_location: "New Jersey".to_string(),
            session_ttl: Duration::from_secs(1800),
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_single_shot() {
        let config = Config::default();
        assert_eq!(config.llm_max_attempts, 1);
        assert_eq!(config.default_location, "New Jersey");
        assert_eq!(config.port, 8080);
        assert_eq!(config.session_ttl, Duration::from_secs(1800));
    }

    #[test]
    fn test_parse_env_falls_back_to_default_when_unset() {
        let value: u32 = parse_env("NAVIGATOR_TEST_SURELY_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }
}
