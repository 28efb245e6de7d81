use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    pub fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        AppError::InvalidArgument(msg.into())
    }

    pub fn transport<T: Into<String>>(msg: T) -> Self {
        AppError::Transport(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, AppError::InvalidArgument(_))
    }
}
