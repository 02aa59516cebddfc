//! The module contains the errors the engine can return.
//!
//! The computation itself never fails: an inconsistent allocation is reported
//! through [`Calculations::is_valid`]. Errors come from the operations that
//! mutate a group and from the validation boundary that checks documents
//! before they reach the engine.
//!
//!  [`Calculations::is_valid`]: crate::Calculations::is_valid
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid tip: {0}")]
    InvalidTip(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid payment group: {0}")]
    InvalidPaymentGroup(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidTip(a), Self::InvalidTip(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidPaymentGroup(a), Self::InvalidPaymentGroup(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
