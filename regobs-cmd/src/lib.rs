//! Command implementations for the RegObs CLI.
//!
//! Provides subcommands for submitting a demonstration snow registration and
//! exporting column test reports.

use clap::{Subcommand, ValueEnum};
use regobs_core::connection::Language;
use std::path::PathBuf;

pub mod report;
pub mod submit;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LanguageArg {
    Norwegian,
    English,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Norwegian => Language::Norwegian,
            LanguageArg::English => Language::English,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the demonstration snow registration and submit it
    SubmitDemo {
        /// Print the payload instead of submitting it
        #[arg(long)]
        dry_run: bool,

        /// Language of the returned registration
        #[arg(short, long, value_enum, default_value = "english")]
        language: LanguageArg,

        /// API base URL (overrides REGOBS_API_URL)
        #[arg(long)]
        api_url: Option<String>,

        /// Account username (overrides REGOBS_USERNAME)
        #[arg(short, long)]
        username: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },

    /// Write column tests and the surrounding stratigraphy to a semicolon separated file
    TestsReport {
        /// JSON array of field observations
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the report
        #[arg(short, long)]
        output: PathBuf,

        /// Leave out tests from observers below this competence level
        #[arg(long)]
        min_competence: Option<i32>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::SubmitDemo {
            dry_run,
            language,
            api_url,
            username,
            timeout_secs,
        } => {
            submit::run_submit_demo(submit::SubmitOptions {
                dry_run,
                language: language.into(),
                api_url,
                username,
                timeout: std::time::Duration::from_secs(timeout_secs),
            })
            .await
        }
        Command::TestsReport {
            input,
            output,
            min_competence,
        } => report::run_tests_report(&input, &output, min_competence).map(|_| ()),
    }
}
