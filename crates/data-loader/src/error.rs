//! Error types for the data-loader crate.
//!
//! Every variant here is a startup-time failure: the artifact directory is
//! read once, and a missing or malformed file means the recommendation
//! service cannot run at all. Lookups never produce these errors.

use thiserror::Error;

/// Errors that can occur while loading and validating artifacts
///
/// The `#[derive(Error)]` macro from thiserror implements
/// `std::error::Error` and `Display` from the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Artifact file does not exist
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in an artifact file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// Matrix or vector shape does not line up with the rest of the store
    #[error("Dimension mismatch in {artifact}: expected {expected}, found {found}")]
    DimensionMismatch {
        artifact: String,
        expected: usize,
        found: usize,
    },

    /// The neighbor model descriptor is not valid JSON
    #[error("Invalid model descriptor: {0}")]
    ModelError(#[from] serde_json::Error),

    /// Cross-artifact validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ArtifactError>;
