// Argus Core Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArgusError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Incident sink error: {0}")]
    Sink(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for ArgusError {
    fn from(err: anyhow::Error) -> Self {
        ArgusError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ArgusError>;
