//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a user, transaction or budget period does
//!   not exist (or is not owned by the caller).
//! - [`InvalidBudgetRange`] thrown when a budget request is incomplete or its
//!   start date is not before its end date.
//! - [`InvalidQuery`] thrown when a date-range query misses a bound.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidBudgetRange`]: EngineError::InvalidBudgetRange
//!  [`InvalidQuery`]: EngineError::InvalidQuery
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid budget range: {0}")]
    InvalidBudgetRange(String),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Password hashing failed: {0}")]
    Password(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// `true` for errors caused by a malformed or incomplete request.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::InvalidBudgetRange(_)
                | Self::InvalidQuery(_)
                | Self::InvalidField(_)
        )
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidBudgetRange(a), Self::InvalidBudgetRange(b)) => a == b,
            (Self::InvalidQuery(a), Self::InvalidQuery(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::Password(a), Self::Password(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
