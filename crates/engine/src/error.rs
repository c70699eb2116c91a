//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when an item record is malformed or breaks an
//!   invariant (unparseable date, negative amount, sale before purchase...).
//! - [`KeyNotFound`] thrown when an item is not found.
//! - [`Fetch`] thrown when a snapshot could not be loaded from a store.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Fetch`]: EngineError::Fetch
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid item {item_id}: {reason}")]
    Validation { item_id: String, reason: String },
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error("Fetch failed: {0}")]
    Fetch(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    pub(crate) fn validation(item_id: impl ToString, reason: impl Into<String>) -> Self {
        Self::Validation {
            item_id: item_id.to_string(),
            reason: reason.into(),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Validation {
                    item_id: a,
                    reason: ra,
                },
                Self::Validation {
                    item_id: b,
                    reason: rb,
                },
            ) => a == b && ra == rb,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidStatus(a), Self::InvalidStatus(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidTransition(a), Self::InvalidTransition(b)) => a == b,
            (Self::UnsupportedCurrency(a), Self::UnsupportedCurrency(b)) => a == b,
            (Self::Fetch(a), Self::Fetch(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
