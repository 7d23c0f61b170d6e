//! Error types for the registry and the persistence gateway.
//!
//! Nothing in this crate is fatal to the process: every variant is
//! recoverable by the caller, and the explicitly idempotent operations
//! (double pause, double resume, cancel of an absent id) are not errors at
//! all.

use thiserror::Error;

/// Errors from timer registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// A timer with this id already exists. The original entry is untouched;
    /// the caller should pick a new id or cancel the existing timer first.
    #[error("timer `{0}` already exists")]
    DuplicateTimer(String),

    /// The caller supplied input the registry refuses to clamp silently.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors from the JSON file store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this name exists on disk.
    #[error("no record named `{0}`")]
    NotFound(String),

    /// The name would escape the storage directory or is empty.
    #[error("record name `{0}` is not allowed")]
    InvalidName(String),

    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}
