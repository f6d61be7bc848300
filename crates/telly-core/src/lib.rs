//! Core pipeline for telly: JUnit results in, TestRail results out.
//!
//! 1. [`junit::load_junit_results`] reads a Beaker JUnit report and groups
//!    its test cases into passed, failed and skipped.
//! 2. [`resolver::CaseIdResolver`] finds the script behind each case and
//!    extracts the TestRail case id from its source.
//! 3. [`orchestrator::set_results`] posts one result per case through a
//!    [`submit::ResultSink`] and collects per-test problems in a
//!    [`orchestrator::RunReport`].
//!
//! ```no_run
//! use std::path::Path;
//! use telly_core::{load_junit_results, set_results, Submitter, TellyConfig};
//! use telly_testrail::{Credentials, TestRailClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = TellyConfig::from_env();
//! let junit = Path::new("junit/latest/beaker_junit.xml");
//!
//! let groups = load_junit_results(junit)?;
//! let client = TestRailClient::new(config.testrail.clone(), Credentials::load_default()?)?;
//! let submitter = Submitter::from_config(&config)?;
//!
//! let report = set_results(&client, &submitter, &groups, junit, "1234").await;
//! for (test, problem) in &report.errors {
//!     eprintln!("{test}: {problem}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod junit;
pub mod model;
pub mod orchestrator;
pub mod resolver;
pub mod submit;

pub use config::{StatusIds, TellyConfig, DEFAULT_CASE_ID_PATTERN};
pub use errors::{ConfigError, LookupError, ParseError, RecordError, SubmissionError};
pub use junit::{load_junit_results, parse_results};
pub use model::{CaseId, Outcome, ResultGroups, ResultStatus, TestRecord};
pub use orchestrator::{set_results, RunReport};
pub use resolver::{case_id_from_source, CaseIdResolver, ParentRelativeLocator, ScriptLocator};
pub use submit::{build_comment, format_elapsed, ResultSink, Submitter};
