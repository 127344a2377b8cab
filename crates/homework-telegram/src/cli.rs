//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use homework_core::{config, Config, Result};

/// Homework status bot - forwards review status changes to Telegram
#[derive(Parser, Debug)]
#[command(name = "homework-telegram")]
#[command(about = "Polls the homework API and reports status changes to a Telegram chat")]
pub struct Args {
    /// Homework API endpoint (overrides PRACTICUM_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Seconds between polls (overrides HOMEWORK_RETRY_PERIOD)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub retry_period: Option<u64>,

    /// Start of the first query window as a unix timestamp (default: now)
    #[arg(long)]
    pub from_date: Option<i64>,

    /// Log file (overrides HOMEWORK_LOG_FILE, default: app.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_file(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(config::log_file)
    }

    /// Initial cursor: `--from-date` or the current time.
    pub fn start_cursor(&self) -> i64 {
        self.from_date
            .unwrap_or_else(|| chrono::Utc::now().timestamp())
    }

    /// Apply command-line overrides on top of the environment configuration.
    pub fn apply(&self, mut config: Config) -> Result<Config> {
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint)?;
        }
        if let Some(secs) = self.retry_period {
            config = config.with_retry_period(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config::from_lookup(|name| match name {
            "PRACTICUM_TOKEN" => Some("p".to_string()),
            "TELEGRAM_TOKEN" => Some("t".to_string()),
            "TELEGRAM_CHAT_ID" => Some("1".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["homework-telegram"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(args.endpoint.is_none());
        assert!(args.from_date.is_none());

        let config = args.apply(base_config()).unwrap();
        assert_eq!(config.retry_period, Duration::from_secs(config::DEFAULT_RETRY_PERIOD_SECS));
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "homework-telegram",
            "--endpoint",
            "http://localhost:9000/statuses/",
            "--retry-period",
            "30",
            "--from-date",
            "1700000000",
            "--log-file",
            "/tmp/homework.log",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.verbose, 2);
        assert_eq!(args.start_cursor(), 1_700_000_000);
        assert_eq!(args.log_file(), PathBuf::from("/tmp/homework.log"));

        let config = args.apply(base_config()).unwrap();
        assert_eq!(config.endpoint.as_str(), "http://localhost:9000/statuses/");
        assert_eq!(config.retry_period, Duration::from_secs(30));
    }

    #[test]
    fn test_zero_retry_period_rejected() {
        assert!(Args::try_parse_from(["homework-telegram", "--retry-period", "0"]).is_err());
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let args = Args::try_parse_from(["homework-telegram", "--endpoint", "nope"]).unwrap();
        assert!(args.apply(base_config()).is_err());
    }

    #[test]
    fn test_start_cursor_defaults_to_now() {
        let args = Args::try_parse_from(["homework-telegram"]).unwrap();
        let before = chrono::Utc::now().timestamp();
        let cursor = args.start_cursor();
        assert!(cursor >= before);
    }
}
