use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum GateError {
    #[error("restriction store error: {0}")]
    Store(String),

    #[error("membership provider error: {0}")]
    Membership(String),

    #[error("invalid group id: {0}")]
    InvalidGroupId(String),

    #[error("authenticity check failed: {0}")]
    Authenticity(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Poisoned lock error: {0}")]
    PoisonedLock(String),
}

impl From<serde_json::Error> for GateError {
    fn from(err: serde_json::Error) -> Self {
        GateError::InvalidFormat(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for GateError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        GateError::PoisonedLock(err.to_string())
    }
}
