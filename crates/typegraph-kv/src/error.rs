use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a key-value store.
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    #[diagnostic(code("KV-001"))]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to prepare store directory {path}")]
    #[diagnostic(code("KV-002"), help("Check that the parent directory is writable"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store unavailable: {0}")]
    #[diagnostic(code("KV-003"))]
    Unavailable(String),
}
