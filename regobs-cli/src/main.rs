//! RegObs CLI - submit snow registrations and export column test reports.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "regobs-cli",
    version,
    about = "RegObs snow registration toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: regobs_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    regobs_cmd::run(cli.command).await
}
