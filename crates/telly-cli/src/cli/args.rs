use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "telly",
    about = "Post the results of a Beaker JUnit report to a TestRail test run",
    disable_version_flag = true
)]
pub struct Cli {
    /// The testrun id
    #[arg(
        short = 't',
        long = "testrun-id",
        value_name = "TESTRUN_ID",
        required_unless_present = "version"
    )]
    pub testrun_id: Option<String>,

    /// Beaker junit file
    #[arg(
        short = 'j',
        long = "junit-file",
        visible_alias = "junit-folder",
        value_name = "JUNIT_FILE",
        required_unless_present = "version"
    )]
    pub junit_file: Option<PathBuf>,

    /// TestRail credentials file [default: ~/.testrail_credentials.yaml]
    #[arg(long, env = "TELLY_CREDENTIALS", value_name = "PATH")]
    pub credentials: Option<PathBuf>,

    /// TestRail base URL
    #[arg(long, env = "TELLY_TESTRAIL_URL", value_name = "URL")]
    pub testrail_url: Option<String>,

    /// Report the current version number
    #[arg(short = 'v', long)]
    pub version: bool,
}
