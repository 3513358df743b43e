use crate::form::FieldErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid user: {0}")]
    Validation(FieldErrors),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Directory is already initialized")]
    AlreadyInitialized,

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
