//! Error types for the pagesift engine.

use thiserror::Error;

/// Errors surfaced by the selection stage.
///
/// Nothing else in the pipeline errors: missing metadata degrades to
/// defaults and an unusable sort specification is a reported no-op.
#[derive(Debug, Error)]
pub enum SiftError {
    /// The lookup pattern was not a valid regular expression.
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, SiftError>;
