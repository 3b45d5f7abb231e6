//! Error type for the ledger core
//!
//! The only failure category is storage I/O: absent counters and state
//! variables are valid states (lazily created or surfaced as `None`),
//! never errors.

use std::path::PathBuf;

/// Error type for ledger operations
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("failed to create ledger directory {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
