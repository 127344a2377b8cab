//! Homework Core - polling logic for the homework status bot.
//!
//! - **client**: HTTP client for the homework status API
//! - **config**: Startup configuration read from the environment
//! - **error**: Error taxonomy shared by every component
//! - **notifier**: The seam a chat transport plugs into
//! - **poller**: The fetch / compare / notify / sleep loop
//! - **response**: Shape validation of API responses
//! - **verdict**: Known review statuses and their messages

pub mod client;
pub mod config;
pub mod error;
pub mod notifier;
pub mod poller;
pub mod response;
pub mod verdict;

pub use client::{HomeworkSource, PracticumClient};
pub use config::Config;
pub use error::{ClientErrorKind, HomeworkError, Result};
pub use notifier::Notifier;
pub use poller::{failure_message, PollState, Poller, TickOutcome};
pub use response::{validate, ApiResponse, HomeworkRecord};
pub use verdict::{translate, Verdict};
