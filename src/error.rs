use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("missing 'api_key' in config: {0}")]
    MissingApiKey(PathBuf),

    #[error("could not determine home directory")]
    NoHomeDir,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("api key is empty")]
    EmptyApiKey,

    #[error("invalid url '{0}'")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("http {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("failed to fetch {stage}: {source}")]
    Fetch {
        stage: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("unexpected fetch result for '{0}'")]
    UnexpectedOutput(&'static str),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write file '{path}': {source}")]
    WriteReport {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("{tool} not found in PATH")]
    ToolMissing { tool: &'static str },

    #[error("{tool} {action} failed with exit code {code}: {output}")]
    NonZeroExit {
        tool: &'static str,
        action: &'static str,
        code: i32,
        output: String,
    },

    #[error("folder id is empty")]
    MissingFolder,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
