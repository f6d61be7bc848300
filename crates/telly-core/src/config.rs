//! Pipeline configuration.
//!
//! Everything that would otherwise be a process-wide constant (TestRail URL,
//! status ids, case id pattern) is carried here and passed to the components
//! that need it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use telly_testrail::TestRailConfig;

use crate::errors::ConfigError;
use crate::model::ResultStatus;

/// Default case id pattern: a ticket token (`PROJ-1234`) and, later on the
/// same line, `c` or `C` followed by the numeric case id. ASCII only, so
/// non-ASCII digits never end up in a request URL.
pub const DEFAULT_CASE_ID_PATTERN: &str = r".*(?P<ticket>(?-u:\w)+-[0-9]+).*[cC](?P<case_id>[0-9]+)";

/// Capture group the case id pattern must define.
pub const CASE_ID_GROUP: &str = "case_id";

/// TestRail status ids per result status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusIds {
    #[serde(default = "default_passed")]
    pub passed: u32,
    #[serde(default = "default_blocked")]
    pub blocked: u32,
    #[serde(default = "default_failed")]
    pub failed: u32,
}

fn default_passed() -> u32 {
    1
}

fn default_blocked() -> u32 {
    2
}

fn default_failed() -> u32 {
    5
}

impl Default for StatusIds {
    fn default() -> Self {
        Self {
            passed: default_passed(),
            blocked: default_blocked(),
            failed: default_failed(),
        }
    }
}

impl StatusIds {
    pub fn id_for(&self, status: ResultStatus) -> u32 {
        match status {
            ResultStatus::Passed => self.passed,
            ResultStatus::Blocked => self.blocked,
            ResultStatus::Failed => self.failed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TellyConfig {
    #[serde(default)]
    pub testrail: TestRailConfig,

    #[serde(default)]
    pub status_ids: StatusIds,

    #[serde(default = "default_case_id_pattern")]
    pub case_id_pattern: String,
}

fn default_case_id_pattern() -> String {
    DEFAULT_CASE_ID_PATTERN.to_string()
}

impl Default for TellyConfig {
    fn default() -> Self {
        Self {
            testrail: TestRailConfig::default(),
            status_ids: StatusIds::default(),
            case_id_pattern: default_case_id_pattern(),
        }
    }
}

impl TellyConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `TELLY_TESTRAIL_URL` | TestRail base URL |
    /// | `TELLY_TESTRAIL_TIMEOUT` | Request timeout in seconds |
    /// | `TELLY_CASE_ID_PATTERN` | Regex with a `case_id` group |
    pub fn from_env() -> Self {
        Self {
            testrail: TestRailConfig::from_env(),
            status_ids: StatusIds::default(),
            case_id_pattern: std::env::var("TELLY_CASE_ID_PATTERN")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(default_case_id_pattern),
        }
    }

    pub fn with_testrail_url(mut self, url: impl Into<String>) -> Self {
        self.testrail.url = url.into();
        self
    }

    pub fn with_case_id_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.case_id_pattern = pattern.into();
        self
    }

    pub fn with_status_ids(mut self, status_ids: StatusIds) -> Self {
        self.status_ids = status_ids;
        self
    }

    /// Compile [`TellyConfig::case_id_pattern`], checking for the `case_id` group.
    pub fn case_id_regex(&self) -> Result<Regex, ConfigError> {
        let regex = Regex::new(&self.case_id_pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: self.case_id_pattern.clone(),
            message: e.to_string(),
        })?;

        if !regex.capture_names().flatten().any(|n| n == CASE_ID_GROUP) {
            return Err(ConfigError::MissingCaseIdGroup {
                pattern: self.case_id_pattern.clone(),
            });
        }

        Ok(regex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_status_ids_defaults() {
        let ids = StatusIds::default();
        assert_eq!(ids.id_for(ResultStatus::Passed), 1);
        assert_eq!(ids.id_for(ResultStatus::Blocked), 2);
        assert_eq!(ids.id_for(ResultStatus::Failed), 5);
    }

    #[test]
    fn test_default_pattern_compiles() {
        let regex = TellyConfig::default().case_id_regex().unwrap();
        let caps = regex.captures("# PROJ-1234 ... c5678").unwrap();
        assert_eq!(&caps[CASE_ID_GROUP], "5678");
    }

    #[test]
    fn test_pattern_without_group_rejected() {
        let config = TellyConfig::default().with_case_id_pattern(r"C(\d+)");
        assert!(matches!(
            config.case_id_regex(),
            Err(ConfigError::MissingCaseIdGroup { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = TellyConfig::default().with_case_id_pattern(r"(?P<case_id>\d+");
        assert!(matches!(
            config.case_id_regex(),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: TellyConfig =
            serde_json::from_str(r#"{"status_ids": {"blocked": 4}}"#).unwrap();
        assert_eq!(config.status_ids.blocked, 4);
        assert_eq!(config.status_ids.passed, 1);
        assert_eq!(config.case_id_pattern, DEFAULT_CASE_ID_PATTERN);
        assert_eq!(config.testrail.url, telly_testrail::DEFAULT_TESTRAIL_URL);
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var("TELLY_TESTRAIL_URL", "https://testrail.example.com");
        std::env::set_var("TELLY_CASE_ID_PATTERN", r"case (?P<case_id>\d+)");

        let config = TellyConfig::from_env();
        assert_eq!(config.testrail.url, "https://testrail.example.com");
        assert_eq!(config.case_id_pattern, r"case (?P<case_id>\d+)");

        std::env::remove_var("TELLY_TESTRAIL_URL");
        std::env::remove_var("TELLY_CASE_ID_PATTERN");

        let config = TellyConfig::from_env();
        assert_eq!(config.testrail.url, telly_testrail::DEFAULT_TESTRAIL_URL);
        assert_eq!(config.case_id_pattern, DEFAULT_CASE_ID_PATTERN);
    }
}
