//! Error types for the homework poller.

use thiserror::Error;

/// HTTP client errors the homework API is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    /// 400: malformed query, usually a bad `from_date`.
    BadRequest,
    /// 401: the OAuth token was rejected.
    Unauthorized,
    /// 403: the token has no access to the endpoint.
    Forbidden,
    /// 404: the endpoint moved or never existed.
    NotFound,
}

impl ClientErrorKind {
    /// Map a status code to a known client error, if it is one.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(Self::BadRequest),
            401 => Some(Self::Unauthorized),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            _ => None,
        }
    }

    pub fn status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
        }
    }
}

impl std::fmt::Display for ClientErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::BadRequest => "bad request, check the from_date parameter",
            Self::Unauthorized => "unauthorized, the API token was rejected",
            Self::Forbidden => "forbidden, the API token has no access",
            Self::NotFound => "endpoint not found",
        };
        write!(f, "{} ({})", text, self.status())
    }
}

/// Errors that can occur while polling for homework statuses.
///
/// Causes are kept as strings so that two occurrences of the same failure
/// compare equal; the poller relies on this to announce each distinct error
/// only once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HomeworkError {
    /// Required environment variables are not set.
    #[error("missing required environment variables: {}", .0.join(", "))]
    ConfigMissing(Vec<String>),

    /// A configuration value could not be parsed.
    #[error("invalid configuration value for {name}: {reason}")]
    ConfigInvalid { name: String, reason: String },

    /// Transport-level failure (timeout, DNS, connection refused, body read).
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The API answered with a known 4xx status.
    #[error("API client error: {0}")]
    ClientError(ClientErrorKind),

    /// The API answered with any other non-200 status.
    #[error("API server error: {status} {reason}")]
    ServerError { status: u16, reason: String },

    /// The 200 body was not valid JSON.
    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    /// The JSON did not have the expected shape.
    #[error("unexpected API response shape: {0}")]
    SchemaError(String),

    /// A homework record lacks a required key.
    #[error("homework record has no \"{0}\" key")]
    MissingField(String),

    /// A homework record carries a status outside the verdict table.
    #[error("unknown homework status: {0}")]
    UnknownStatus(String),

    /// The chat message could not be delivered.
    #[error("failed to send notification: {0}")]
    NotifyFailed(String),
}

/// Result type for homework operations.
pub type Result<T> = std::result::Result<T, HomeworkError>;

impl From<reqwest::Error> for HomeworkError {
    fn from(e: reqwest::Error) -> Self {
        let cause = error_chain(&e);
        if e.is_timeout() {
            HomeworkError::RequestFailed(format!("timed out: {}", cause))
        } else {
            HomeworkError::RequestFailed(cause)
        }
    }
}

/// Render an error and every `source()` below it, joined with `": "`.
///
/// reqwest keeps the actual cause (refused, DNS, TLS) out of its own
/// `Display`, so the top-level message alone cannot tell failures apart.
pub fn error_chain(e: &dyn std::error::Error) -> String {
    let mut text = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.ends_with(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
