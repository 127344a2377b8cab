//! The polling loop.
//!
//! Each tick asks the API for homeworks changed since the cursor, announces
//! a status change of the newest homework, and remembers what it announced
//! so unchanged statuses and repeated errors stay quiet.
//!
//! # Tick outcomes
//!
//! ```text
//! fetch ──► validate ──► no homeworks ─────────────► NoUpdate   (cursor advances)
//!                    └─► same status as last time ─► NoChange   (cursor advances)
//!                    └─► translate ──► send ok ────► Notified   (cursor advances)
//!                                  └─► send failed ► NotifyFailed
//! any error ──► report once per distinct error ────► Failed     (cursor stays)
//! ```

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::client::HomeworkSource;
use crate::error::{HomeworkError, Result};
use crate::notifier::Notifier;
use crate::response::validate;
use crate::verdict::translate;

/// Memory carried from one tick to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound (seconds since epoch) of the next query window.
    pub cursor: i64,
    /// Status of the newest homework as last announced.
    pub last_status: Option<String>,
    /// Last error that was successfully announced.
    pub last_error: Option<HomeworkError>,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The API reported no homeworks in the window.
    NoUpdate,
    /// The newest homework still has the last announced status.
    NoChange,
    /// A status change was announced with this message.
    Notified(String),
    /// A status change was detected but the message did not go out.
    NotifyFailed(HomeworkError),
    /// The tick failed before anything could be announced.
    Failed(HomeworkError),
}

/// Text sent to the chat when a tick fails.
pub fn failure_message(error: &HomeworkError) -> String {
    format!("Program failure: {}", error)
}

/// Polls a [`HomeworkSource`] and reports changes through a [`Notifier`].
pub struct Poller<S, N> {
    source: S,
    notifier: N,
    retry_period: Duration,
    state: PollState,
}

impl<S, N> Poller<S, N>
where
    S: HomeworkSource,
    N: Notifier,
{
    /// Create a poller whose first window starts one period before `cursor`.
    pub fn new(source: S, notifier: N, retry_period: Duration, cursor: i64) -> Self {
        Self {
            source,
            notifier,
            retry_period,
            state: PollState {
                cursor,
                ..PollState::default()
            },
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Start of the next query window.
    ///
    /// The window reaches one retry period behind the cursor so that an
    /// update landing right at the boundary of the previous window is still
    /// seen.
    pub fn window_start(&self) -> i64 {
        let overlap = i64::try_from(self.retry_period.as_secs()).unwrap_or(i64::MAX);
        self.state.cursor.saturating_sub(overlap).max(0)
    }

    /// Poll forever, sleeping one retry period after every tick.
    pub async fn run(&mut self) {
        info!(
            cursor = self.state.cursor,
            retry_period_secs = self.retry_period.as_secs(),
            "Starting homework poller"
        );
        loop {
            let outcome = self.tick().await;
            debug!(?outcome, "Tick finished");
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Run a single poll iteration without sleeping.
    pub async fn tick(&mut self) -> TickOutcome {
        match self.check().await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.report(&e).await;
                TickOutcome::Failed(e)
            }
        }
    }

    async fn check(&mut self) -> Result<TickOutcome> {
        let from_date = self.window_start();
        let raw = self.source.fetch(from_date).await?;
        let response = validate(&raw)?;

        let Some(latest) = response.latest() else {
            info!(from_date, "No homework updates");
            self.succeed(response.current_date);
            return Ok(TickOutcome::NoUpdate);
        };

        if latest.status().is_some() && latest.status() == self.state.last_status.as_deref() {
            info!(status = ?latest.status(), "No status change");
            self.succeed(response.current_date);
            return Ok(TickOutcome::NoChange);
        }

        let message = translate(latest)?;
        match self.notifier.send(&message).await {
            Ok(()) => {
                info!(message = %message, "Status change sent");
                self.state.last_status = latest.status.clone();
                self.succeed(response.current_date);
                Ok(TickOutcome::Notified(message))
            }
            Err(e) => {
                warn!(error = %e, "Failed to send status change, will retry next tick");
                Ok(TickOutcome::NotifyFailed(e))
            }
        }
    }

    /// Advance the cursor and forget the last error.
    fn succeed(&mut self, current_date: i64) {
        if current_date < self.state.cursor {
            warn!(
                cursor = self.state.cursor,
                current_date, "Server date is behind the cursor, keeping cursor"
            );
        }
        self.state.cursor = self.state.cursor.max(current_date);
        self.state.last_error = None;
    }

    /// Log a failed tick and announce it unless it was already announced.
    async fn report(&mut self, e: &HomeworkError) {
        let message = failure_message(e);
        error!(error = %e, cursor = self.state.cursor, "{}", message);

        if self.state.last_error.as_ref() == Some(e) {
            debug!("Error already reported, not sending again");
            return;
        }

        match self.notifier.send(&message).await {
            Ok(()) => self.state.last_error = Some(e.clone()),
            Err(send_err) => warn!(error = %send_err, "Failed to send error report"),
        }
    }
}
