use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClaimError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid disruption data: {0}")]
    InvalidDisruptionData(String),

    #[error("Flight not found: {0}")]
    FlightNotFound(String),

    #[error("Flight cannot be assessed: {0}")]
    NotAssessable(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ClaimError>;
