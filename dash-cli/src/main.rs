//! Dash CLI - inspect, filter and render the dashboard datasets from a terminal.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "dash-cli",
    version,
    about = "Tips and Titanic dashboard data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: dash_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    dash_cmd::run(cli.command).await
}
