//! # Store Error Types
//!
//! Construction-time errors for trolley-store.
//!
//! Note the asymmetry with the rest of the crate: cart *operations* never
//! return errors to the caller (failures go to the notifier), but *opening*
//! a store can fail and that failure must reach the caller.

use thiserror::Error;

/// Errors raised while constructing or hydrating a CartStore.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot database could not be opened or read.
    #[error("Persistence error: {0}")]
    Db(#[from] trolley_db::DbError),

    /// HTTP client construction failed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration file missing, unreadable, or malformed.
    #[error("Config error: {0}")]
    Config(String),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
