//! Posting a whole report, one record at a time.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::model::ResultGroups;
use crate::submit::{ResultSink, Submitter};

/// Outcome of [`set_results`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Problem message per test name. A later problem for the same name
    /// replaces the earlier one.
    pub errors: BTreeMap<String, String>,

    /// Number of results the sink accepted.
    pub submitted: usize,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Post every record in `groups` to `run_id`: passes, then failures, then
/// skips, each in report order.
///
/// A record that cannot be resolved or posted is noted in the report and
/// the loop moves on to the next one.
pub async fn set_results(
    sink: &dyn ResultSink,
    submitter: &Submitter,
    groups: &ResultGroups,
    junit_file: &Path,
    run_id: &str,
) -> RunReport {
    let mut report = RunReport::default();

    for (status, records) in groups.groups() {
        for record in records {
            match submitter
                .submit(sink, status, record, junit_file, run_id)
                .await
            {
                Ok(_) => report.submitted += 1,
                Err(e) => {
                    warn!(test = %record.name(), error = %e, "could not set result");
                    report
                        .errors
                        .insert(record.name().to_string(), e.to_string());
                }
            }
        }
    }

    info!(
        submitted = report.submitted,
        errors = report.errors.len(),
        run_id,
        "finished setting results"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TellyConfig;
    use crate::errors::SubmissionError;
    use crate::model::{CaseId, TestRecord};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use telly_testrail::ResultPayload;

    /// Accepts everything except the case ids in `reject`.
    #[derive(Default)]
    struct FakeSink {
        reject: Vec<&'static str>,
        accepted: Mutex<Vec<(String, u32)>>,
    }

    #[async_trait]
    impl ResultSink for FakeSink {
        async fn add_result_for_case(
            &self,
            _run_id: &str,
            case_id: &CaseId,
            payload: &ResultPayload,
        ) -> Result<(), SubmissionError> {
            if self.reject.contains(&case_id.as_str()) {
                return Err(SubmissionError::Rejected {
                    message: format!("case {case_id} is not in this run"),
                });
            }
            self.accepted
                .lock()
                .unwrap()
                .push((case_id.to_string(), payload.status_id));
            Ok(())
        }
    }

    struct Tree {
        _root: tempfile::TempDir,
        junit: std::path::PathBuf,
    }

    fn tree(scripts: &[(&str, &str)]) -> Tree {
        let root = tempfile::tempdir().unwrap();
        let junit_dir = root.path().join("junit").join("run1");
        std::fs::create_dir_all(&junit_dir).unwrap();
        let script_dir = root.path().join("tests");
        std::fs::create_dir_all(&script_dir).unwrap();
        for (name, content) in scripts {
            std::fs::write(script_dir.join(name), content).unwrap();
        }
        Tree {
            junit: junit_dir.join("beaker_junit.xml"),
            _root: root,
        }
    }

    fn submitter() -> Submitter {
        Submitter::from_config(&TellyConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_going() {
        let tree = tree(&[
            ("p1.rb", "# T-1 c1\n"),
            ("p2.rb", "# T-1 c2\n"),
            ("p3.rb", "# T-1 c3\n"),
            ("f1.rb", "# nothing to see\n"),
            ("s1.rb", "# T-1 c4\n"),
        ]);
        let groups: ResultGroups = vec![
            TestRecord::passed("p1.rb", "tests", "1"),
            TestRecord::failed("f1.rb", "tests", "1", "boom"),
            TestRecord::passed("p2.rb", "tests", "1"),
            TestRecord::skipped("s1.rb", "tests", "1", "later"),
            TestRecord::passed("p3.rb", "tests", "1"),
        ]
        .into_iter()
        .collect();
        let sink = FakeSink::default();

        let report = set_results(&sink, &submitter(), &groups, &tree.junit, "9").await;

        assert_eq!(report.submitted, 4);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors["f1.rb"].starts_with("no test case id found in"));
        assert!(!report.is_clean());

        let accepted = sink.accepted.lock().unwrap();
        assert_eq!(
            *accepted,
            [
                ("1".to_string(), 1),
                ("2".to_string(), 1),
                ("3".to_string(), 1),
                ("4".to_string(), 2),
            ]
        );
    }

    #[tokio::test]
    async fn test_remote_rejection_recorded() {
        let tree = tree(&[("a.rb", "# T-1 c10\n"), ("b.rb", "# T-1 c11\n")]);
        let groups: ResultGroups = vec![
            TestRecord::failed("a.rb", "tests", "3", "x"),
            TestRecord::passed("b.rb", "tests", "1"),
        ]
        .into_iter()
        .collect();
        let sink = FakeSink {
            reject: vec!["10"],
            ..Default::default()
        };

        let report = set_results(&sink, &submitter(), &groups, &tree.junit, "9").await;

        assert_eq!(report.submitted, 1);
        assert_eq!(report.errors["a.rb"], "case 10 is not in this run");
    }

    #[tokio::test]
    async fn test_same_name_keeps_last_error() {
        let tree = tree(&[("dup.rb", "# T-1 c7\n")]);
        let groups: ResultGroups = vec![
            TestRecord::passed("dup.rb", "tests", "1"),
            TestRecord::passed("dup.rb", "missing", "1"),
        ]
        .into_iter()
        .collect();
        let sink = FakeSink {
            reject: vec!["7"],
            ..Default::default()
        };

        let report = set_results(&sink, &submitter(), &groups, &tree.junit, "9").await;

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors["dup.rb"].starts_with("could not read test script"));
        assert_eq!(report.submitted, 0);
    }

    #[tokio::test]
    async fn test_empty_report() {
        let tree = tree(&[]);
        let sink = FakeSink::default();

        let report = set_results(
            &sink,
            &submitter(),
            &ResultGroups::default(),
            &tree.junit,
            "9",
        )
        .await;

        assert!(report.is_clean());
        assert_eq!(report.submitted, 0);
    }
}
