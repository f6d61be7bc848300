//! Request/response types and client configuration for the TestRail API.

use serde::{Deserialize, Serialize};

/// Default TestRail instance.
pub const DEFAULT_TESTRAIL_URL: &str = "https://testrail.ops.puppetlabs.net/";

/// Body of `POST add_result_for_case/{run_id}/{case_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPayload {
    /// TestRail status id (1 = passed, 2 = blocked, 5 = failed by default).
    pub status_id: u32,

    /// Free-form comment shown on the result.
    pub comment: String,

    /// Elapsed time in TestRail timespan format, e.g. `"3s"`.
    pub elapsed: String,
}

impl ResultPayload {
    pub fn new(status_id: u32, comment: impl Into<String>, elapsed: impl Into<String>) -> Self {
        Self {
            status_id,
            comment: comment.into(),
            elapsed: elapsed.into(),
        }
    }
}

/// The result object TestRail returns after a successful add.
///
/// Only the fields telly looks at are decoded; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedResult {
    /// Id of the new result.
    pub id: u64,

    /// Id of the test (case instance within the run).
    #[serde(default)]
    pub test_id: Option<u64>,

    /// Status that was recorded.
    #[serde(default)]
    pub status_id: Option<u32>,
}

/// TestRail client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRailConfig {
    /// Base URL of the TestRail instance (the part before `index.php`).
    #[serde(default = "default_testrail_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_testrail_url() -> String {
    DEFAULT_TESTRAIL_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for TestRailConfig {
    fn default() -> Self {
        Self {
            url: default_testrail_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl TestRailConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `TELLY_TESTRAIL_URL` | TestRail base URL |
    /// | `TELLY_TESTRAIL_TIMEOUT` | Request timeout in seconds |
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("TELLY_TESTRAIL_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(default_testrail_url),
            timeout_secs: std::env::var("TELLY_TESTRAIL_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        }
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
