use std::fmt;

use serde::{Deserialize, Serialize};

/// Fallback for a failure element that carries no message at all.
pub const NO_FAILURE_MESSAGE: &str = "no failure message";

/// Outcome of one `<testcase>`. The messages live on the variants, so a
/// failure message exists iff the record failed, and likewise for skips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed { message: String },
    Skipped { message: String },
}

/// One test case entry from a JUnit report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TestRecordRepr")]
pub struct TestRecord {
    name: String,
    classname: String,
    elapsed_seconds: String,
    #[serde(flatten)]
    outcome: Outcome,
}

impl TestRecord {
    pub fn passed(
        name: impl Into<String>,
        classname: impl Into<String>,
        elapsed_seconds: impl Into<String>,
    ) -> Self {
        Self::with_outcome(name, classname, elapsed_seconds, Outcome::Passed)
    }

    /// An empty message is replaced by [`NO_FAILURE_MESSAGE`].
    pub fn failed(
        name: impl Into<String>,
        classname: impl Into<String>,
        elapsed_seconds: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = NO_FAILURE_MESSAGE.to_string();
        }
        Self::with_outcome(
            name,
            classname,
            elapsed_seconds,
            Outcome::Failed { message },
        )
    }

    pub fn skipped(
        name: impl Into<String>,
        classname: impl Into<String>,
        elapsed_seconds: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::with_outcome(
            name,
            classname,
            elapsed_seconds,
            Outcome::Skipped {
                message: message.into(),
            },
        )
    }

    fn with_outcome(
        name: impl Into<String>,
        classname: impl Into<String>,
        elapsed_seconds: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        Self {
            name: name.into(),
            classname: classname.into(),
            elapsed_seconds: elapsed_seconds.into(),
            outcome,
        }
    }

    /// Script file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Script directory, relative to the test tree root.
    pub fn classname(&self) -> &str {
        &self.classname
    }

    /// Raw `time` attribute, seconds as a decimal string.
    pub fn elapsed_seconds(&self) -> &str {
        &self.elapsed_seconds
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn failure_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn skip_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Skipped { message } => Some(message),
            _ => None,
        }
    }

    /// The status this record is reported with.
    pub fn status(&self) -> ResultStatus {
        ResultStatus::for_outcome(&self.outcome)
    }
}

/// Wire shape of [`TestRecord`]; deserialized records go through the
/// constructors so a failure message is never empty.
#[derive(Deserialize)]
struct TestRecordRepr {
    name: String,
    classname: String,
    elapsed_seconds: String,
    #[serde(flatten)]
    outcome: Outcome,
}

impl From<TestRecordRepr> for TestRecord {
    fn from(repr: TestRecordRepr) -> Self {
        match repr.outcome {
            Outcome::Failed { message } => {
                Self::failed(repr.name, repr.classname, repr.elapsed_seconds, message)
            }
            outcome => Self::with_outcome(repr.name, repr.classname, repr.elapsed_seconds, outcome),
        }
    }
}

/// Records of one report, partitioned by outcome, each in document order.
///
/// Only built by routing records through [`ResultGroups::push`], so a record
/// always sits in the group matching its outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultGroups {
    pub passed: Vec<TestRecord>,
    pub failed: Vec<TestRecord>,
    pub skipped: Vec<TestRecord>,
}

impl ResultGroups {
    /// Route a record into the group matching its outcome.
    pub fn push(&mut self, record: TestRecord) {
        match record.outcome {
            Outcome::Passed => self.passed.push(record),
            Outcome::Failed { .. } => self.failed.push(record),
            Outcome::Skipped { .. } => self.skipped.push(record),
        }
    }

    pub fn len(&self) -> usize {
        self.passed.len() + self.failed.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Groups in submission order: Passed, Failed, Skipped.
    pub fn groups(&self) -> [(ResultStatus, &[TestRecord]); 3] {
        [
            (ResultStatus::Passed, self.passed.as_slice()),
            (ResultStatus::Failed, self.failed.as_slice()),
            (ResultStatus::Blocked, self.skipped.as_slice()),
        ]
    }

    /// Every record, group by group.
    pub fn iter(&self) -> impl Iterator<Item = &TestRecord> {
        self.passed
            .iter()
            .chain(self.failed.iter())
            .chain(self.skipped.iter())
    }
}

impl FromIterator<TestRecord> for ResultGroups {
    fn from_iter<I: IntoIterator<Item = TestRecord>>(iter: I) -> Self {
        let mut groups = Self::default();
        for record in iter {
            groups.push(record);
        }
        groups
    }
}

/// Status a result is posted with. Skips are reported as blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Passed,
    Blocked,
    Failed,
}

impl ResultStatus {
    pub fn for_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Passed => Self::Passed,
            Outcome::Failed { .. } => Self::Failed,
            Outcome::Skipped { .. } => Self::Blocked,
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Passed => "passed",
            Self::Blocked => "blocked",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// TestRail case id as found in a test script (digits only).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
