//! Case id lookup: from a JUnit record back to its test script, and from the
//! script to the TestRail case id written in it.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::config::CASE_ID_GROUP;
use crate::errors::LookupError;
use crate::model::{CaseId, TestRecord};

/// Maps a record to the path of the script that produced it.
pub trait ScriptLocator: Send + Sync {
    fn locate(&self, junit_file: &Path, record: &TestRecord) -> PathBuf;
}

/// `<junit dir>/<levels_up × "..">/<classname>/<name>`.
///
/// Beaker writes `junit/<run>/beaker_junit.xml` two levels below the
/// directory the `tests/...` classnames are relative to, hence the default
/// of 2. The join is purely lexical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentRelativeLocator {
    pub levels_up: usize,
}

impl Default for ParentRelativeLocator {
    fn default() -> Self {
        Self { levels_up: 2 }
    }
}

impl ScriptLocator for ParentRelativeLocator {
    fn locate(&self, junit_file: &Path, record: &TestRecord) -> PathBuf {
        let mut path = junit_file.parent().map(Path::to_path_buf).unwrap_or_default();
        for _ in 0..self.levels_up {
            path.push("..");
        }
        path.push(record.classname());
        path.push(record.name());
        path
    }
}

/// Finds the TestRail case id for a record.
pub struct CaseIdResolver {
    locator: Box<dyn ScriptLocator>,
    pattern: Regex,
}

impl std::fmt::Debug for CaseIdResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseIdResolver")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

impl CaseIdResolver {
    /// `pattern` must define a `case_id` group; see
    /// [`TellyConfig::case_id_regex`](crate::config::TellyConfig::case_id_regex).
    pub fn new(locator: impl ScriptLocator + 'static, pattern: Regex) -> Self {
        Self {
            locator: Box::new(locator),
            pattern,
        }
    }

    /// Resolver with the Beaker layout.
    pub fn with_default_layout(pattern: Regex) -> Self {
        Self::new(ParentRelativeLocator::default(), pattern)
    }

    pub fn script_path(&self, record: &TestRecord, junit_file: &Path) -> PathBuf {
        self.locator.locate(junit_file, record)
    }

    pub fn resolve(&self, record: &TestRecord, junit_file: &Path) -> Result<CaseId, LookupError> {
        let path = self.script_path(record, junit_file);
        debug!(test = %record.name(), script = %path.display(), "resolving case id");

        let bytes = std::fs::read(&path).map_err(|source| LookupError::Unreadable {
            path: path.clone(),
            source,
        })?;
        let source = String::from_utf8_lossy(&bytes);

        case_id_from_source(&source, &self.pattern).ok_or(LookupError::NoCaseId { path })
    }
}

/// Case id from the first matching line of `source`.
///
/// Later matching lines are ignored even if they name a different case.
pub fn case_id_from_source(source: &str, pattern: &Regex) -> Option<CaseId> {
    source
        .lines()
        .filter_map(|line| pattern.captures(line))
        .find_map(|caps| caps.name(CASE_ID_GROUP).map(|m| CaseId::new(m.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TellyConfig;

    fn pattern() -> Regex {
        TellyConfig::default().case_id_regex().unwrap()
    }

    #[test]
    fn test_extracts_case_id() {
        let id = case_id_from_source("test_name 'PROJ-1234 ... c5678' do", &pattern());
        assert_eq!(id, Some(CaseId::new("5678")));
    }

    #[test]
    fn test_uppercase_c() {
        let id = case_id_from_source("# QA-99 TestRail C42", &pattern());
        assert_eq!(id.unwrap().as_str(), "42");
    }

    #[test]
    fn test_first_matching_line_wins() {
        let source = "\
require 'beaker'
# no ticket here c1
test_name 'BKR-1 first c100'
test_name 'BKR-2 second c200'
";
        let id = case_id_from_source(source, &pattern());
        assert_eq!(id, Some(CaseId::new("100")));
    }

    #[test]
    fn test_non_ascii_digits_are_not_a_case_id() {
        assert_eq!(case_id_from_source("# PROJ-1 c\u{663}\u{664}", &pattern()), None);
        assert_eq!(case_id_from_source("# PROJ-\u{661} c12", &pattern()), None);

        let id = case_id_from_source("# PROJ-1 c\u{663}\u{664} c77", &pattern());
        assert_eq!(id, Some(CaseId::new("77")));
    }

    #[test]
    fn test_no_match() {
        let source = "test_name 'no ids here'\nstep 'c123 without ticket'\n";
        assert_eq!(case_id_from_source(source, &pattern()), None);
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = Regex::new(r"@case\((?P<case_id>\d+)\)").unwrap();
        let id = case_id_from_source("    @case(31337)\n", &pattern);
        assert_eq!(id, Some(CaseId::new("31337")));
    }

    #[test]
    fn test_default_layout_path() {
        let resolver = CaseIdResolver::with_default_layout(pattern());
        let record = TestRecord::passed("foo.rb", "tests/base", "1");

        let path = resolver.script_path(&record, Path::new("/repo/junit/latest/beaker_junit.xml"));
        assert_eq!(
            path,
            PathBuf::from("/repo/junit/latest/../../tests/base/foo.rb")
        );
    }

    #[test]
    fn test_bare_junit_filename() {
        let locator = ParentRelativeLocator::default();
        let record = TestRecord::passed("foo.rb", "tests", "1");

        let path = locator.locate(Path::new("beaker_junit.xml"), &record);
        assert_eq!(path, PathBuf::from("../../tests/foo.rb"));
    }

    #[test]
    fn test_custom_locator() {
        struct Flat(PathBuf);
        impl ScriptLocator for Flat {
            fn locate(&self, _junit_file: &Path, record: &TestRecord) -> PathBuf {
                self.0.join(record.name())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("foo.rb"), "# TR-1 c9\n").unwrap();

        let resolver = CaseIdResolver::new(Flat(dir.path().to_path_buf()), pattern());
        let record = TestRecord::passed("foo.rb", "ignored", "1");
        let id = resolver.resolve(&record, Path::new("anywhere.xml")).unwrap();
        assert_eq!(id.as_str(), "9");
    }

    #[test]
    fn test_resolve_from_disk() {
        let root = tempfile::tempdir().unwrap();
        let junit_dir = root.path().join("junit").join("latest");
        let script_dir = root.path().join("tests").join("base");
        std::fs::create_dir_all(&junit_dir).unwrap();
        std::fs::create_dir_all(&script_dir).unwrap();
        std::fs::write(
            script_dir.join("foo.rb"),
            "test_name 'PROJ-1234 - C5678 - does the thing' do\nend\n",
        )
        .unwrap();

        let resolver = CaseIdResolver::with_default_layout(pattern());
        let junit = junit_dir.join("beaker_junit.xml");

        let found = TestRecord::passed("foo.rb", "tests/base", "1");
        assert_eq!(resolver.resolve(&found, &junit).unwrap().as_str(), "5678");

        let missing = TestRecord::passed("bar.rb", "tests/base", "1");
        assert!(matches!(
            resolver.resolve(&missing, &junit),
            Err(LookupError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_resolve_without_case_id() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("plain.rb"), "puts 'hello'\n").unwrap();

        let resolver = CaseIdResolver::with_default_layout(pattern());
        let record = TestRecord::passed("plain.rb", "", "1");
        let err = resolver
            .resolve(&record, &nested.join("junit.xml"))
            .unwrap_err();
        assert!(matches!(err, LookupError::NoCaseId { .. }));
    }
}
