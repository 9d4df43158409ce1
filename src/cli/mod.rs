pub mod doctor;
pub mod export;
pub mod schema;
pub mod setup;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tess")]
#[command(
    author,
    version,
    about = "Export peer and self review feedback from Lattice into Markdown"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick a report and cycle, then export their reviews
    Export(ExportArgs),

    /// Interactively create or update the config file
    Setup(SetupArgs),

    /// Check config, API access and optional tools
    Doctor(DoctorArgs),

    /// Print JSON Schema for the config file
    Schema,
}

#[derive(Parser, Clone)]
pub struct ExportArgs {
    /// Path to config file (default: ~/.tess/config.toml)
    #[arg(short, long, env = "TESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Mask reviewer names, scores and quoted feedback
    #[arg(long)]
    pub censor: bool,

    /// Directory the Markdown report is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Override the maximum number of review records fetched
    #[arg(long)]
    pub review_limit: Option<usize>,

    /// Google Drive folder ID; when set the report is uploaded via rclone
    #[arg(long)]
    pub rclone_folder_id: Option<String>,

    /// rclone remote name (overrides config, default: drive)
    #[arg(long)]
    pub rclone_remote: Option<String>,

    /// Upload format: docx (imported as a Google Doc) or pdf
    #[arg(long, default_value = "docx")]
    pub upload_format: String,

    /// Preferred pandoc PDF engine (e.g. tectonic, xelatex)
    #[arg(long)]
    pub pdf_engine: Option<String>,

    /// Copy template documents into the Drive folder after export
    #[arg(long)]
    pub copy_templates: bool,

    /// Drive file ID of the Hub template (overrides config)
    #[arg(long)]
    pub template_hub_id: Option<String>,

    /// Drive file ID of the Cover template (overrides config)
    #[arg(long)]
    pub template_cover_id: Option<String>,

    /// Drive file ID of the Review template (overrides config)
    #[arg(long)]
    pub template_review_id: Option<String>,
}

#[derive(Parser, Clone)]
pub struct SetupArgs {
    /// Path to config file (default: ~/.tess/config.toml)
    #[arg(short, long, env = "TESS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct DoctorArgs {
    /// Path to config file (default: ~/.tess/config.toml)
    #[arg(short, long, env = "TESS_CONFIG")]
    pub config: Option<PathBuf>,
}
