//! HTTP layer: auth and status mapping.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use crate::auth::Credentials;
use crate::error::{TestRailError, TestRailResult};

use super::helpers::{api_url, parse_error_body};

/// HTTP backend for making requests (holds reqwest client, credentials, base url).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) credentials: Credentials,
}

impl HttpBackend {
    /// POST a JSON body to an API v2 endpoint. No retries.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> TestRailResult<reqwest::Response> {
        let url = api_url(&self.base_url, endpoint);
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .basic_auth(self.credentials.username(), Some(self.credentials.password()))
            .json(body)
            .send()
            .await?;

        check_status(response).await
    }
}

/// Map non-success statuses to [`TestRailError`]; pass 2xx through.
async fn check_status(response: reqwest::Response) -> TestRailResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);

        return Err(TestRailError::RateLimited { retry_after });
    }

    let body = response.text().await.unwrap_or_default();
    let message = parse_error_body(&body, &status.to_string());

    Err(match status.as_u16() {
        400 => TestRailError::BadRequest { message },
        401 | 403 => TestRailError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        404 => TestRailError::NotFound { message },
        code => TestRailError::Http {
            status: code,
            message,
        },
    })
}
