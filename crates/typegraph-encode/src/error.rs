use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;
use typegraph_kv::StoreError;
use typegraph_model::SourceError;

/// Result type for graph encoding and ingestion.
pub type GraphResult<T> = Result<T, GraphError>;

/// Result type for framing.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors raised while encoding or ingesting packages.
#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    /// The graph refers to an entity the universe does not contain.
    #[error("Dangling reference to {entity} {id}")]
    #[diagnostic(
        code("GRAPH-001"),
        help("The type checker handed over an incomplete graph; this is a bug in the checker")
    )]
    DanglingReference { entity: &'static str, id: String },

    /// The graph contains a construct the encoder cannot represent.
    #[error("Unsupported construct: {detail}")]
    #[diagnostic(code("GRAPH-002"))]
    UnsupportedConstruct { detail: String },

    #[error("Storage failure")]
    #[diagnostic(
        code("GRAPH-010"),
        help("Nothing from the failed package was written; retrying re-sends the whole batch")
    )]
    Storage(#[from] StoreError),

    #[error("Failed to load package `{path}`")]
    #[diagnostic(code("GRAPH-020"))]
    Upstream {
        path: String,
        #[source]
        source: SourceError,
    },

    #[error("Import cycle through package `{path}`")]
    #[diagnostic(code("GRAPH-021"))]
    ImportCycle { path: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised when reading a framed buffer back.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("Buffer ends inside a length prefix at byte {offset}")]
    #[diagnostic(code("FRAME-001"))]
    Truncated { offset: usize },

    #[error("Length prefix at byte {offset} does not fit in 64 bits")]
    #[diagnostic(code("FRAME-002"))]
    VarintOverflow { offset: usize },

    #[error("Field at byte {offset} wants {wanted} bytes but only {available} remain")]
    #[diagnostic(code("FRAME-003"))]
    ShortField {
        offset: usize,
        wanted: u64,
        available: usize,
    },
}

impl FrameError {
    /// Shifts the reported offset by `base`, for errors raised on a sub-slice.
    pub(crate) fn at(self, base: usize) -> Self {
        match self {
            FrameError::Truncated { offset } => FrameError::Truncated { offset: base + offset },
            FrameError::VarintOverflow { offset } => FrameError::VarintOverflow { offset: base + offset },
            FrameError::ShortField { offset, wanted, available } => FrameError::ShortField {
                offset: base + offset,
                wanted,
                available,
            },
        }
    }
}

/// Errors raised while loading a [`crate::GraphConfig`].
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Error reading configuration file {path}")]
    #[diagnostic(
        code("CONFIG-001"),
        help("Check file permissions and ensure the file exists")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code("CONFIG-002"),
        help("Check the TOML syntax; known sections are [store] and [ingest]")
    )]
    Parse(#[from] toml::de::Error),

    #[error("Sequential ids cannot be used with a store that already holds a graph")]
    #[diagnostic(
        code("CONFIG-003"),
        help("Counter-based ids restart at 1 in every process and would overwrite stored types; use `ids = \"random\"` or a fresh store")
    )]
    SequentialIdsOnPopulatedStore,
}
