//! Unified application error type.
//! Store, controller and CLI layers all return AppError so the
//! presenter and `main` can report failures in one consistent way.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Store is not initialized (handle closed)")]
    NotInitialized,

    #[error("Invalid store name: '{0}'")]
    InvalidStoreName(String),

    #[error("Store '{name}' already holds {found} records, not {expected}")]
    StoreKindMismatch {
        name: String,
        expected: String,
        found: String,
    },

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Input
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Already shown by a screen
    // ---------------------------
    #[error("{0}")]
    Reported(Box<AppError>),
}

impl AppError {
    /// Errors the user can fix by re-entering input; the screen stays usable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Validation(_) | AppError::InvalidPrice(_) => true,
            AppError::Reported(inner) => inner.is_recoverable(),
            _ => false,
        }
    }

    /// Mark the error as already shown to the user.
    pub fn reported(self) -> Self {
        match self {
            AppError::Reported(_) => self,
            other => AppError::Reported(Box::new(other)),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
