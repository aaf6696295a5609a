use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::error::StorageError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Filtered dump is incomplete: {0}")]
    IncompleteDump(String),

    #[error("Export format version changed from {old} to {new}")]
    FormatVersionMismatch { old: String, new: String },

    #[error("Invalid export metadata: {0}")]
    InvalidMetadata(String),
}
