use groovyscope_api::IndexError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroovyscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("Index error: {0}")]
    Index(#[from] IndexError),
    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, GroovyscopeError>;
