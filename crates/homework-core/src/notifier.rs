//! Notification channel abstraction.

use async_trait::async_trait;

use crate::error::Result;

/// Delivers a plain-text message to the configured chat.
///
/// Implementations report delivery failure as `NotifyFailed`; the poller
/// logs it and carries on, it never aborts the loop.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &str) -> Result<()>;
}
