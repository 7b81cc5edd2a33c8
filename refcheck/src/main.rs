// refcheck/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug refcheck verify ... for build details.
    // stderr keeps `--json` output clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Verify {
            model,
            data,
            project_dir,
            reference_dir,
            mode,
            output,
            json,
        } => {
            commands::verify::execute(commands::verify::VerifyArgs {
                model,
                data,
                project_dir,
                reference_dir,
                mode,
                output,
                json,
            })
            .await
        }

        Commands::Constraints { model } => commands::constraints::execute(model),

        Commands::Index {
            model,
            project_dir,
            reference_dir,
        } => commands::index::execute(model, project_dir, reference_dir).await,
    }
}
