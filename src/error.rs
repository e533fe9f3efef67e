use crate::submission::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Prediction service returned {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("Invalid prediction response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Prediction service reported: {0}")]
    Semantic(String),

    #[error("A submission is already in flight")]
    Busy,

    #[error("Submission was superseded by a newer one")]
    Superseded,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Failures the user sees as "try again later": the request never
    /// produced a readable answer from the service.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::HttpStatus { .. } | Self::InvalidResponse(_)
        )
    }
}
