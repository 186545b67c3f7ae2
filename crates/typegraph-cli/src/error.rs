use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;
use typegraph_encode::{ConfigError, GraphError};
use typegraph_kv::StoreError;

/// Errors surfaced to the user by the `typegraph` binary.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to {operation} `{path}`")]
    #[diagnostic(code(typegraph::cli::io_error))]
    IoError {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{path}` is not a valid universe file")]
    #[diagnostic(
        code(typegraph::cli::bad_universe),
        help("Universe files are the JSON form of a checked `Universe`")
    )]
    BadUniverse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("package `{0}` is not part of the universe")]
    #[diagnostic(code(typegraph::cli::unknown_package))]
    UnknownPackage(String),

    #[error("nothing is stored under `{0}`")]
    #[diagnostic(code(typegraph::cli::missing_key))]
    MissingKey(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),
}
