use miette::Diagnostic;
use thiserror::Error;

/// Result type for package loading.
pub type SourceResult<T> = Result<T, SourceError>;

/// Failures reported by the type-checking collaborator when asked for a package.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("package `{0}` is not known to the type checker")]
    #[diagnostic(
        code("SOURCE-001"),
        help("Make sure the package was parsed and type-checked before it is imported")
    )]
    PackageNotFound(String),

    #[error("package `{path}` failed to type-check: {message}")]
    #[diagnostic(code("SOURCE-002"))]
    CheckFailed { path: String, message: String },
}
