use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid todo id: {0}")]
    InvalidIdentifier(String),

    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status {0}")]
    Status(u16),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TodoError>;
