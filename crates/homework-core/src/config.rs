//! Startup configuration for the homework poller.
//!
//! Everything is read once from the process environment and frozen into a
//! [`Config`] that the poller borrows for its whole lifetime.
//!
//! # Environment Variables
//!
//! Required:
//! - `PRACTICUM_TOKEN`: OAuth token for the homework API
//! - `TELEGRAM_TOKEN`: Bot token from @BotFather
//! - `TELEGRAM_CHAT_ID`: Chat that receives the notifications
//!
//! Optional:
//! - `PRACTICUM_ENDPOINT`: Override the homework API endpoint
//! - `HOMEWORK_RETRY_PERIOD`: Seconds between polls (default: 600)
//! - `HOMEWORK_REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 30)
//! - `HOMEWORK_LOG_FILE`: Log file path (default: `app.log`)

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{HomeworkError, Result};

/// Environment variable holding the homework API token.
pub const PRACTICUM_TOKEN_ENV: &str = "PRACTICUM_TOKEN";

/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_TOKEN";

/// Environment variable holding the destination chat.
pub const TELEGRAM_CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Environment variable for a custom API endpoint.
pub const ENDPOINT_ENV: &str = "PRACTICUM_ENDPOINT";

/// Environment variable for the poll period in seconds.
pub const RETRY_PERIOD_ENV: &str = "HOMEWORK_RETRY_PERIOD";

/// Environment variable for the HTTP timeout in seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "HOMEWORK_REQUEST_TIMEOUT";

/// Environment variable for the log file path.
pub const LOG_FILE_ENV: &str = "HOMEWORK_LOG_FILE";

/// Homework status API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Seconds between two polls.
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

/// HTTP timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "app.log";

/// Variables that must be present for the bot to start.
pub const REQUIRED_VARS: [&str; 3] = [PRACTICUM_TOKEN_ENV, TELEGRAM_TOKEN_ENV, TELEGRAM_CHAT_ID_ENV];

/// Immutable process configuration.
#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    /// Numeric chat id or `@channel` username.
    pub telegram_chat_id: String,
    pub endpoint: Url,
    pub retry_period: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigMissing` naming every absent required variable, or
    /// `ConfigInvalid` when an optional value cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let missing = missing_vars(&get);
        if !missing.is_empty() {
            return Err(HomeworkError::ConfigMissing(missing));
        }

        let endpoint = get(ENDPOINT_ENV).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = parse_endpoint(&endpoint)?;

        let retry_period = match get(RETRY_PERIOD_ENV) {
            Some(raw) => parse_secs(RETRY_PERIOD_ENV, &raw)?,
            None => Duration::from_secs(DEFAULT_RETRY_PERIOD_SECS),
        };
        let request_timeout = match get(REQUEST_TIMEOUT_ENV) {
            Some(raw) => parse_secs(REQUEST_TIMEOUT_ENV, &raw)?,
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            practicum_token: get(PRACTICUM_TOKEN_ENV).unwrap_or_default(),
            telegram_token: get(TELEGRAM_TOKEN_ENV).unwrap_or_default(),
            telegram_chat_id: get(TELEGRAM_CHAT_ID_ENV).unwrap_or_default(),
            endpoint,
            retry_period,
            request_timeout,
        })
    }

    /// Replace the endpoint, validating it first.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn with_retry_period(mut self, retry_period: Duration) -> Self {
        self.retry_period = retry_period;
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint.as_str())
            .field("retry_period", &self.retry_period)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Names of the required variables that the lookup cannot supply.
pub fn missing_vars<F>(lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    REQUIRED_VARS
        .iter()
        .copied()
        .filter(|name| lookup(*name).is_none())
        .map(|name| name.to_string())
        .collect()
}

/// Log file path, honouring `HOMEWORK_LOG_FILE`.
pub fn log_file() -> PathBuf {
    std::env::var(LOG_FILE_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| HomeworkError::ConfigInvalid {
        name: ENDPOINT_ENV.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(HomeworkError::ConfigInvalid {
            name: ENDPOINT_ENV.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

fn parse_secs(name: &str, raw: &str) -> Result<Duration> {
    let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
        HomeworkError::ConfigInvalid {
            name: name.to_string(),
            reason: e.to_string(),
        }
    })?;
    if secs == 0 {
        return Err(HomeworkError::ConfigInvalid {
            name: name.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            (PRACTICUM_TOKEN_ENV, "practicum-secret"),
            (TELEGRAM_TOKEN_ENV, "123:telegram-secret"),
            (TELEGRAM_CHAT_ID_ENV, "424242"),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&full_env())).unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.retry_period, Duration::from_secs(600));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.telegram_chat_id, "424242");
    }

    #[test]
    fn test_all_missing_vars_reported() {
        let err = Config::from_lookup(lookup_from(&[(TELEGRAM_TOKEN_ENV, "x")])).unwrap_err();
        assert_eq!(
            err,
            HomeworkError::ConfigMissing(vec![
                PRACTICUM_TOKEN_ENV.to_string(),
                TELEGRAM_CHAT_ID_ENV.to_string(),
            ])
        );
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut env = full_env();
        env[0] = (PRACTICUM_TOKEN_ENV, "   ");
        let err = Config::from_lookup(lookup_from(&env)).unwrap_err();
        assert_eq!(err, HomeworkError::ConfigMissing(vec![PRACTICUM_TOKEN_ENV.to_string()]));
    }

    #[test]
    fn test_optional_overrides() {
        let mut env = full_env();
        env.push((ENDPOINT_ENV, "http://localhost:8080/statuses/"));
        env.push((RETRY_PERIOD_ENV, "5"));
        env.push((REQUEST_TIMEOUT_ENV, "2"));
        let config = Config::from_lookup(lookup_from(&env)).unwrap();
        assert_eq!(config.endpoint.as_str(), "http://localhost:8080/statuses/");
        assert_eq!(config.retry_period, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_retry_period() {
        let mut env = full_env();
        env.push((RETRY_PERIOD_ENV, "soon"));
        let err = Config::from_lookup(lookup_from(&env)).unwrap_err();
        assert!(matches!(err, HomeworkError::ConfigInvalid { ref name, .. } if name == RETRY_PERIOD_ENV));

        let mut env = full_env();
        env.push((RETRY_PERIOD_ENV, "0"));
        assert!(Config::from_lookup(lookup_from(&env)).is_err());
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut env = full_env();
        env.push((ENDPOINT_ENV, "ftp://example.com/"));
        let err = Config::from_lookup(lookup_from(&env)).unwrap_err();
        assert!(matches!(err, HomeworkError::ConfigInvalid { .. }));

        let config = Config::from_lookup(lookup_from(&full_env())).unwrap();
        assert!(config.with_endpoint("not a url").is_err());
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = Config::from_lookup(lookup_from(&full_env())).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("practicum-secret"));
        assert!(!debug.contains("telegram-secret"));
        assert!(debug.contains("424242"));
    }

    #[test]
    fn test_missing_vars_none_missing() {
        assert!(missing_vars(lookup_from(&full_env())).is_empty());
    }
}
