//! Human-readable output on stdout.

use std::fmt::Write as _;
use std::path::Path;

use telly_core::{ResultGroups, RunReport};

const BANNER: &str = r"
 __o_____
()/O\___()
 `-\\---' TELLY
              {version}!
      __\/__
     | .... |
     | .... |
      ------
";

pub(crate) fn version_banner() -> String {
    BANNER.replace("{version}", env!("CARGO_PKG_VERSION"))
}

pub(crate) fn run_results(groups: &ResultGroups) -> String {
    format!(
        "Run results:\n{} Passing\n{} Failing or Erroring\n{} Skipped",
        groups.passed.len(),
        groups.failed.len(),
        groups.skipped.len()
    )
}

/// Problem listing, or `None` when every result was posted.
pub(crate) fn problems(report: &RunReport) -> Option<String> {
    if report.is_clean() {
        return None;
    }
    let mut out = String::from("Error: There were problems processing these test scripts:");
    for (test, message) in &report.errors {
        let _ = write!(out, "\n{test}:\n\t{message}");
    }
    Some(out)
}

pub(crate) fn missing_credentials(path: &Path) -> String {
    format!(
        "Error: Could not find {path}\n\
         Create {path} with the following:\n\
         testrail_username: your.username\n\
         testrail_password: yourpassword",
        path = path.display()
    )
}
