//! Homework status bot binary.
//!
//! Start the bot with:
//! ```bash
//! PRACTICUM_TOKEN=xxx TELEGRAM_TOKEN=xxx TELEGRAM_CHAT_ID=123 cargo run -p homework-telegram
//! ```

use clap::Parser;
use homework_core::config::REQUIRED_VARS;
use homework_core::{Config, HomeworkError, PracticumClient, Poller};
use homework_telegram::{logging, Args, TelegramNotifier};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Secrets may live in .env.local or .env next to the binary
    let _ = dotenvy::from_filename(".env.local").or_else(|_| dotenvy::dotenv());

    let args = Args::parse();

    let log_file = args.log_file();
    if let Err(e) = logging::init(args.verbose, &log_file) {
        eprintln!("Error: cannot set up logging to {}: {}", log_file.display(), e);
        std::process::exit(1);
    }

    let config = match Config::from_env().and_then(|c| args.apply(c)) {
        Ok(config) => config,
        Err(e) => {
            report_startup_error(&e);
            std::process::exit(1);
        }
    };
    info!(config = ?config, "Configuration loaded");

    let client = PracticumClient::from_config(&config)?;
    let notifier = TelegramNotifier::from_config(&config)?;

    info!(endpoint = %client.endpoint(), "Polling homework API");

    let mut poller = Poller::new(client, notifier, config.retry_period, args.start_cursor());
    poller.run().await;

    Ok(())
}

fn report_startup_error(e: &HomeworkError) {
    if let HomeworkError::ConfigMissing(missing) = e {
        for name in REQUIRED_VARS {
            if missing.iter().any(|m| m == name) {
                error!(variable = name, "Required environment variable is missing");
            } else {
                info!(variable = name, "Required environment variable is set");
            }
        }
        error!("Missing required environment variables, shutting down");
    } else {
        error!(error = %e, "Invalid configuration, shutting down");
    }
}
