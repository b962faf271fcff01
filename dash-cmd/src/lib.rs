//! Command implementations for the dashboard CLI.
//!
//! Each subcommand loads a dataset the same way the web apps do (falling
//! back to an empty table on failure) and runs it through the shared
//! filter-render pipeline.

use clap::Subcommand;

pub mod args;
pub mod inspect;
pub mod pipeline;

pub use args::PipelineArgs;

#[derive(Subcommand)]
pub enum Command {
    /// Show columns, row count and category values of a CSV
    Inspect {
        /// Path or http(s) URL of the CSV (`.gz` is inflated)
        source: String,

        /// Token to look for as a literal category value
        #[arg(long, default_value = dash_data::filter::ALL_TOKEN)]
        all_token: String,
    },

    /// Write the rows passing a selection as CSV
    Filter {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the artifact a render mode produces, as JSON
    Render {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// table, bar, scatter, histogram or box (defaults to the dashboard's)
        #[arg(short, long)]
        mode: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Inspect { source, all_token } => inspect::run_inspect(&source, &all_token).await,
        Command::Filter { pipeline, output } => {
            pipeline::run_filter(&pipeline, output.as_deref()).await
        }
        Command::Render { pipeline, mode } => {
            pipeline::run_render(&pipeline, mode.as_deref()).await
        }
    }
}
