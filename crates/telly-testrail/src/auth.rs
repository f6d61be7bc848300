//! Credentials for TestRail HTTP Basic authentication.
//!
//! Credentials live in a small YAML file, by default
//! `~/.testrail_credentials.yaml`:
//!
//! ```yaml
//! testrail_username: your.username
//! testrail_password: yourpassword
//! ```
//!
//! The password may also be a TestRail API key.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{TestRailError, TestRailResult};

/// Default credentials file location. `~` expands to the user's home directory.
pub const CREDENTIALS_FILE: &str = "~/.testrail_credentials.yaml";

/// TestRail username and password.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    #[serde(rename = "testrail_username")]
    username: String,

    #[serde(rename = "testrail_password")]
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Load credentials from a YAML file. A leading `~` is expanded.
    pub fn load(path: impl AsRef<Path>) -> TestRailResult<Self> {
        let path = expand_home(path.as_ref());

        let content =
            std::fs::read_to_string(&path).map_err(|_| TestRailError::CredentialsMissing {
                path: path.clone(),
            })?;

        let credentials: Credentials =
            serde_yaml::from_str(&content).map_err(|e| TestRailError::CredentialsInvalid {
                path: path.clone(),
                message: e.to_string(),
            })?;

        if credentials.username.is_empty() {
            return Err(TestRailError::CredentialsInvalid {
                path,
                message: "testrail_username is empty".to_string(),
            });
        }

        Ok(credentials)
    }

    /// Load from `TELLY_CREDENTIALS` if set, otherwise from [`CREDENTIALS_FILE`].
    pub fn load_default() -> TestRailResult<Self> {
        Self::load(Self::default_path())
    }

    /// Path [`Credentials::load_default`] reads from, with `~` expanded.
    pub fn default_path() -> PathBuf {
        let raw = std::env::var("TELLY_CREDENTIALS")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| CREDENTIALS_FILE.to_string());
        expand_home(Path::new(&raw))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Expand a leading `~` to the home directory. Paths without it pass through.
pub(crate) fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "creds.yaml",
            "testrail_username: test\ntestrail_password: testpass\n",
        );

        let creds = Credentials::load(&path).unwrap();
        assert_eq!(creds.username(), "test");
        assert_eq!(creds.password(), "testpass");
    }

    #[test]
    fn test_missing_file_is_credentials_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");

        let err = Credentials::load(&path).unwrap_err();
        match err {
            TestRailError::CredentialsMissing { path: p } => assert_eq!(p, path),
            other => panic!("expected CredentialsMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_key_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "creds.yaml", "testrail_username: test\n");

        let err = Credentials::load(&path).unwrap_err();
        assert!(matches!(err, TestRailError::CredentialsInvalid { .. }));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("alice", "hunter2");
        let shown = format!("{creds:?}");
        assert!(shown.contains("alice"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_expand_home() {
        let plain = Path::new("/etc/creds.yaml");
        assert_eq!(expand_home(plain), plain);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home(Path::new("~/.testrail_credentials.yaml")),
                home.join(".testrail_credentials.yaml")
            );
        }
    }

    #[test]
    #[serial]
    fn test_default_path_honors_env() {
        std::env::set_var("TELLY_CREDENTIALS", "/tmp/telly-creds.yaml");
        assert_eq!(
            Credentials::default_path(),
            PathBuf::from("/tmp/telly-creds.yaml")
        );
        std::env::remove_var("TELLY_CREDENTIALS");
    }
}
