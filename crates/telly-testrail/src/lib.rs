//! TestRail API v2 client for posting test results.
//!
//! This crate implements the single TestRail operation telly needs:
//!
//! - `add_result_for_case/{run_id}/{case_id}` with HTTP Basic auth
//! - Credentials file loading (`~/.testrail_credentials.yaml`)
//! - Status code mapping into [`TestRailError`]
//!
//! # Quick Start
//!
//! ```no_run
//! use telly_testrail::{Credentials, ResultPayload, TestRailClient, TestRailConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let credentials = Credentials::load_default()?;
//! let client = TestRailClient::new(TestRailConfig::from_env(), credentials)?;
//!
//! let payload = ResultPayload::new(1, "Passed", "3s");
//! let added = client.add_result_for_case("1234", "5678", &payload).await?;
//! println!("created result {}", added.id);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `TELLY_TESTRAIL_URL` | TestRail base URL (default: `https://testrail.ops.puppetlabs.net/`) |
//! | `TELLY_TESTRAIL_TIMEOUT` | Request timeout in seconds (default: 30) |
//! | `TELLY_CREDENTIALS` | Credentials file path (default: `~/.testrail_credentials.yaml`) |

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::{Credentials, CREDENTIALS_FILE};
pub use client::{TestRailClient, TESTRAIL_USER_AGENT};
pub use error::{TestRailError, TestRailResult};
pub use types::{AddedResult, ResultPayload, TestRailConfig, DEFAULT_TESTRAIL_URL};
