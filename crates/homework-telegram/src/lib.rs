//! Telegram front end for the homework status bot.
//!
//! Polls the homework API every retry period and posts review status
//! changes to one Telegram chat.
//!
//! # Environment Variables
//!
//! Required:
//! - `PRACTICUM_TOKEN`: OAuth token for the homework API
//! - `TELEGRAM_TOKEN`: Bot token from @BotFather
//! - `TELEGRAM_CHAT_ID`: Numeric chat id or `@channel` name
//!
//! Optional:
//! - `PRACTICUM_ENDPOINT`, `HOMEWORK_RETRY_PERIOD`, `HOMEWORK_REQUEST_TIMEOUT`,
//!   `HOMEWORK_LOG_FILE`
//!
//! # Example
//!
//! ```no_run
//! use homework_core::{Config, PracticumClient, Poller};
//! use homework_telegram::TelegramNotifier;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = PracticumClient::from_config(&config)?;
//!     let notifier = TelegramNotifier::from_config(&config)?;
//!
//!     let mut poller = Poller::new(client, notifier, config.retry_period, 0);
//!     poller.run().await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod logging;
pub mod notifier;

pub use cli::Args;
pub use notifier::{parse_recipient, TelegramNotifier};
