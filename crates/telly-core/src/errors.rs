//! Error taxonomy for the pipeline.
//!
//! Fatal: [`ConfigError`], [`ParseError`]. Per record: [`LookupError`],
//! [`SubmissionError`], both folded into [`RecordError`] at the orchestration
//! boundary.

use std::path::PathBuf;

use telly_testrail::TestRailError;

/// Configuration could not be used. Fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid case id pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("case id pattern {pattern:?} has no `case_id` capture group")]
    MissingCaseIdGroup { pattern: String },

    #[error(transparent)]
    Client(#[from] TestRailError),
}

/// JUnit report missing or malformed. Fatal.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("could not read JUnit file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Only UTF-8 documents are read, whatever the XML declaration says.
    #[error("JUnit file {} is not UTF-8 encoded: {message}", path.display())]
    Encoding { path: PathBuf, message: String },

    #[error("malformed JUnit XML in {origin}: {message}")]
    Malformed { origin: String, message: String },
}

/// Case identifier could not be found for a record.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("could not read test script {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no test case id found in {}", path.display())]
    NoCaseId { path: PathBuf },
}

/// The remote system rejected a result.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Api(#[from] TestRailError),

    /// Rejection from a non-TestRail sink.
    #[error("{message}")]
    Rejected { message: String },
}

/// Why a single record could not be reported.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
