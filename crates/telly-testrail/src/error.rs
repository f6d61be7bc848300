//! Error types for the TestRail client.

use std::path::PathBuf;
use std::time::Duration;

/// TestRail client errors.
#[derive(Debug, thiserror::Error)]
pub enum TestRailError {
    /// Request was rejected as malformed (400), e.g. an unknown case or run id.
    #[error("TestRail API returned HTTP 400: {message}")]
    BadRequest { message: String },

    /// Authentication failed or the user may not write to this run (401/403).
    #[error("unauthorized (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Endpoint or entity not found (404).
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Rate limit exceeded (429).
    #[error("rate limited: retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Any other non-success status.
    #[error("TestRail API returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Network error.
    #[error("network error: {message}")]
    Network { message: String },

    /// Invalid response from TestRail.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Credentials file could not be found or read.
    #[error("could not find credentials file {}", path.display())]
    CredentialsMissing { path: PathBuf },

    /// Credentials file exists but is not valid.
    #[error("invalid credentials file {}: {message}", path.display())]
    CredentialsInvalid { path: PathBuf, message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl From<reqwest::Error> for TestRailError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for TestRail operations.
pub type TestRailResult<T> = Result<T, TestRailError>;
