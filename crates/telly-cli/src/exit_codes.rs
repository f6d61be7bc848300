//! Exit codes for `telly`. Part of the CLI contract.

pub const SUCCESS: i32 = 0;
pub const TEST_PROBLEMS: i32 = 1; // One or more results could not be posted
pub const CONFIG_ERROR: i32 = 2; // Credentials, URL or case id pattern unusable; also clap usage errors
pub const PARSE_ERROR: i32 = 3; // JUnit file missing or malformed
