//! Error types for parcelog.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors produced while loading configuration, parsing records or running an input.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Record lacks a timestamp or a discriminator.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Token after the timestamp is not one of `EV`, `CL`, `PC`.
    #[error("Unknown record discriminator '{0}'")]
    UnknownDiscriminator(String),

    #[error("Failed to open input '{}': {source}", .path.display())]
    UnopenableInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LedgerError {
    /// Whether the error only affects the record that produced it.
    ///
    /// Recoverable errors are absorbed by [`crate::Ledger::run`]; everything
    /// else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LedgerError::MalformedRecord(_) | LedgerError::UnknownDiscriminator(_)
        )
    }
}
