//! Application Errors
//!
//! Errors are returned synchronously from the call that caused them and are
//! never retried. Event handlers are the top level: they log and drop.

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or out-of-range argument to a store, controller or view call
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A configured element id is not present in the document
    #[error("element #{0} not found")]
    MissingElement(String),
    /// No window or document to mount into
    #[error("display host unavailable")]
    HostUnavailable,
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl AppError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        AppError::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, AppError::InvalidArgument(_))
    }
}
