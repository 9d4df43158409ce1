use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod cli;
mod config;
mod error;
mod output;
mod publish;
mod report;
mod tui;
mod workflow;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("tess=debug")
    } else {
        EnvFilter::new("tess=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Export(args) => cli::export::execute(args).await,
        Commands::Setup(args) => cli::setup::execute(args).await,
        Commands::Doctor(args) => {
            let code = cli::doctor::execute(args).await?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Commands::Schema => cli::schema::execute(),
    }
}
