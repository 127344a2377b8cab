//! HTTP client for the homework status API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::{ClientErrorKind, HomeworkError, Result};

/// Query parameter carrying the lower bound of the poll window.
const FROM_DATE_PARAM: &str = "from_date";

/// Anything that can answer "what changed since this timestamp".
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch the raw response for homeworks changed since `from_date`.
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}

/// Client for the homework status endpoint.
///
/// Makes exactly one GET per call and never retries; the poll loop's
/// cadence takes care of that.
pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl PracticumClient {
    /// Create a client for `endpoint` authenticating with `token`.
    pub fn new(endpoint: Url, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint,
            token: token.into(),
        })
    }

    /// Create a client from the startup configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            config.practicum_token.clone(),
            config.request_timeout,
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .http
            .get(self.endpoint.clone())
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[(FROM_DATE_PARAM, from_date)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(status_error(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| HomeworkError::MalformedResponse(e.to_string()))
    }
}

/// Map a non-200 status to the matching error.
fn status_error(status: StatusCode) -> HomeworkError {
    match ClientErrorKind::from_status(status.as_u16()) {
        Some(kind) => HomeworkError::ClientError(kind),
        None => HomeworkError::ServerError {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        },
    }
}
