//! Error type for follow-list maintenance.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourcesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Follow-list config error: {0}")]
    Config(String),

    #[error("Unsupported YAML structure: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, SourcesError>;
