//! Turning one record into one TestRail result.

use std::path::Path;

use async_trait::async_trait;
use telly_testrail::{ResultPayload, TestRailClient};
use tracing::info;

use crate::config::{StatusIds, TellyConfig};
use crate::errors::{ConfigError, RecordError, SubmissionError};
use crate::model::{CaseId, ResultStatus, TestRecord};
use crate::resolver::CaseIdResolver;

/// Where results are posted. [`TestRailClient`] is the production sink.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn add_result_for_case(
        &self,
        run_id: &str,
        case_id: &CaseId,
        payload: &ResultPayload,
    ) -> Result<(), SubmissionError>;
}

#[async_trait]
impl ResultSink for TestRailClient {
    async fn add_result_for_case(
        &self,
        run_id: &str,
        case_id: &CaseId,
        payload: &ResultPayload,
    ) -> Result<(), SubmissionError> {
        TestRailClient::add_result_for_case(self, run_id, case_id.as_str(), payload).await?;
        Ok(())
    }
}

/// TestRail timespan for a JUnit `time` value.
///
/// Rounds half away from zero and never goes below `"1s"`, since TestRail
/// rejects a zero elapsed time. Only the leading number counts (`"12.6s"` is
/// 12.6 seconds); input without one counts as zero.
pub fn format_elapsed(seconds: &str) -> String {
    let rounded = leading_seconds(seconds).round().max(1.0);
    format!("{}s", rounded as u64)
}

/// Longest finite float at the start of `raw`, after leading whitespace.
fn leading_seconds(raw: &str) -> f64 {
    let s = raw.trim_start();
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(s.len());
    (1..=end)
        .rev()
        .find_map(|i| s[..i].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Comment posted with a result.
pub fn build_comment(status: ResultStatus, record: &TestRecord) -> String {
    match status {
        ResultStatus::Failed => format!(
            "Failed with message:\n{}",
            record.failure_message().unwrap_or_default()
        ),
        ResultStatus::Blocked => format!(
            "Skipped with message:\n{}",
            record.skip_message().unwrap_or_default()
        ),
        ResultStatus::Passed => "Passed".to_string(),
    }
}

/// Resolves case ids and posts results, one record at a time. Never retries.
#[derive(Debug)]
pub struct Submitter {
    resolver: CaseIdResolver,
    status_ids: StatusIds,
}

impl Submitter {
    pub fn new(resolver: CaseIdResolver, status_ids: StatusIds) -> Self {
        Self {
            resolver,
            status_ids,
        }
    }

    /// Submitter with the Beaker script layout and the configured pattern
    /// and status ids.
    pub fn from_config(config: &TellyConfig) -> Result<Self, ConfigError> {
        let resolver = CaseIdResolver::with_default_layout(config.case_id_regex()?);
        Ok(Self::new(resolver, config.status_ids))
    }

    /// Payload for `record` reported as `status`.
    pub fn payload(&self, status: ResultStatus, record: &TestRecord) -> ResultPayload {
        ResultPayload::new(
            self.status_ids.id_for(status),
            build_comment(status, record),
            format_elapsed(record.elapsed_seconds()),
        )
    }

    /// Resolve the case id for `record` and post one result for it.
    pub async fn submit(
        &self,
        sink: &dyn ResultSink,
        status: ResultStatus,
        record: &TestRecord,
        junit_file: &Path,
        run_id: &str,
    ) -> Result<CaseId, RecordError> {
        let case_id = self.resolver.resolve(record, junit_file)?;
        let payload = self.payload(status, record);

        info!(
            test = %record.name(),
            case_id = %case_id,
            status = %status,
            elapsed = %payload.elapsed,
            "setting result for test case"
        );

        sink.add_result_for_case(run_id, &case_id, &payload).await?;
        Ok(case_id)
    }
}
