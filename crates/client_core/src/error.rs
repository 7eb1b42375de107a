use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid registry base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to reach the registry service: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success status; `message` is the server's own text when it sent one.
    #[error("{message}")]
    Status { status: StatusCode, message: String },
}

impl ServiceError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            Self::InvalidBaseUrl { .. } => None,
        }
    }
}
