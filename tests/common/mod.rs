//! Shared test utilities for ledger integration tests

use std::path::PathBuf;

use tempfile::TempDir;

use tally::LedgerDb;

/// Initialize logging for tests; set RUST_LOG=debug to see ledger output
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates a temporary file-backed ledger database.
///
/// Returns the TempDir guard (keep it alive for the test body), the
/// database path for reopen tests, and the open handle.
pub fn open_test_db() -> (TempDir, PathBuf, LedgerDb) {
    init_tracing();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("ledger.db");
    let db = LedgerDb::open(&path).expect("Failed to open ledger db");
    (dir, path, db)
}
