use std::path::PathBuf;

use telly_core::{load_junit_results, set_results, ConfigError, Submitter, TellyConfig};
use telly_testrail::{Credentials, TestRailClient, TestRailError};
use tracing::info;

use super::args::Cli;
use super::reporting;
use crate::exit_codes::{CONFIG_ERROR, PARSE_ERROR, SUCCESS, TEST_PROBLEMS};

pub async fn run(cli: Cli) -> anyhow::Result<i32> {
    if cli.version {
        println!("{}", reporting::version_banner());
        return Ok(SUCCESS);
    }

    let (Some(testrun_id), Some(junit_file)) = (cli.testrun_id, cli.junit_file) else {
        anyhow::bail!("--testrun-id and --junit-file are required");
    };

    let mut config = TellyConfig::from_env();
    if let Some(url) = cli.testrail_url {
        config = config.with_testrail_url(url);
    }
    let submitter = match Submitter::from_config(&config) {
        Ok(submitter) => submitter,
        Err(e) => {
            println!("Error: {e}");
            return Ok(CONFIG_ERROR);
        }
    };

    let groups = match load_junit_results(&junit_file) {
        Ok(groups) => groups,
        Err(e) => {
            println!("Error: {e}");
            return Ok(PARSE_ERROR);
        }
    };
    println!("{}", reporting::run_results(&groups));

    let credentials_path = cli.credentials.unwrap_or_else(Credentials::default_path);
    let client = match connect(&config, credentials_path) {
        Ok(client) => client,
        Err(ConfigError::Client(TestRailError::CredentialsMissing { path })) => {
            println!("{}", reporting::missing_credentials(&path));
            return Ok(CONFIG_ERROR);
        }
        Err(e) => {
            println!("Error: {e}");
            return Ok(CONFIG_ERROR);
        }
    };
    info!(url = %client.base_url(), user = %client.username(), "posting results to TestRail");

    let report = set_results(&client, &submitter, &groups, &junit_file, &testrun_id).await;

    match reporting::problems(&report) {
        Some(problems) => {
            println!("{problems}");
            Ok(TEST_PROBLEMS)
        }
        None => Ok(SUCCESS),
    }
}

fn connect(config: &TellyConfig, credentials_path: PathBuf) -> Result<TestRailClient, ConfigError> {
    let credentials = Credentials::load(credentials_path)?;
    Ok(TestRailClient::new(config.testrail.clone(), credentials)?)
}
