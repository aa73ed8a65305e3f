use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid partition: {0}")]
    InvalidPartition(String),

    #[error("Malformed input in {path}: {message}")]
    MalformedInput { path: String, message: String },

    #[error("Vector length mismatch: {0}")]
    LengthMismatch(String),

    #[error("Non-finite value: {0}")]
    NonFinite(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SolverResult<T> = Result<T, SolverError>;
