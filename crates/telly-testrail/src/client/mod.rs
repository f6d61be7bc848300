//! TestRail client for posting results.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::auth::Credentials;
use crate::error::{TestRailError, TestRailResult};
use crate::types::{AddedResult, ResultPayload, TestRailConfig};

mod helpers;
mod http;

use http::HttpBackend;

/// User-Agent sent with every request.
pub const TESTRAIL_USER_AGENT: &str = concat!("telly/", env!("CARGO_PKG_VERSION"));

/// TestRail API client.
#[derive(Debug, Clone)]
pub struct TestRailClient {
    http: HttpBackend,
}

impl TestRailClient {
    pub fn new(config: TestRailConfig, credentials: Credentials) -> TestRailResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(TESTRAIL_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| TestRailError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        let base_url = config.url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(TestRailError::Config {
                message: "TestRail URL is empty".to_string(),
            });
        }

        Ok(Self {
            http: HttpBackend {
                client,
                base_url,
                credentials,
            },
        })
    }

    /// Add a result for a case within a run.
    ///
    /// In TestRail terms this records a result on the *test* that the run
    /// created for `case_id`. Each call creates a new result; repeating a call
    /// adds a duplicate.
    pub async fn add_result_for_case(
        &self,
        run_id: &str,
        case_id: &str,
        payload: &ResultPayload,
    ) -> TestRailResult<AddedResult> {
        let endpoint = format!("add_result_for_case/{}/{}", run_id, case_id);
        debug!(
            run_id = %run_id,
            case_id = %case_id,
            status_id = payload.status_id,
            elapsed = %payload.elapsed,
            "adding result for case"
        );

        let response = self.http.post_json(&endpoint, payload).await?;

        response
            .json()
            .await
            .map_err(|e| TestRailError::InvalidResponse {
                message: format!("failed to parse add_result_for_case response: {}", e),
            })
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    pub fn username(&self) -> &str {
        self.http.credentials.username()
    }
}
