use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PcError {
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },
    #[error("Input file is not valid JSON: {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Input file is not a JSON array of records: {}", path.display())]
    NotAnArray { path: PathBuf },
    #[error("Record {index} is missing field '{field}'")]
    MissingField { index: usize, field: String },
    #[error("Invalid compression level '{0}': expected light, medium or aggressive")]
    InvalidLevel(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Collaborator failed to load: {0}")]
    CollaboratorLoad(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PcError {
    /// File-level errors abort the run; record-level errors are skipped.
    pub fn is_record_level(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}

pub type Result<T> = std::result::Result<T, PcError>;
