//! Store error model.

use thiserror::Error;

use stockroom_core::DomainError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a store operation.
///
/// Domain failures (validation, missing product, insufficient stock) are kept
/// separate from storage failures so the HTTP layer can map them precisely.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Re-exported so callers can name storage failures without a direct `sqlx` dependency.
pub use sqlx::Error as SqlxError;
