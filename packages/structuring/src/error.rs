//! Typed errors for the structuring library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can surface from a structuring request.
///
/// Enrichment failures are deliberately NOT here: an individual enricher
/// failing escalates to the next strategy inside the pipeline and never
/// reaches the caller. Only invalid input and storage problems do.
#[derive(Debug, Error)]
pub enum StructuringError {
    /// Raw capture text absent or below the minimum length
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Document not found in store
    #[error("document not found: {id}")]
    NotFound { id: String },
}

/// Errors from a single enrichment attempt.
///
/// All variants are handled identically by the pipeline: log the stage and
/// cause, then escalate to the next strategy.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// HTTP transport failed (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Service answered with a non-success status
    #[error("service returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Response payload could not be parsed
    #[error("unparsable payload: {0}")]
    Parse(String),
}

/// Result type alias for structuring operations.
pub type Result<T> = std::result::Result<T, StructuringError>;

/// Result type alias for enrichment attempts.
pub type EnrichResult<T> = std::result::Result<T, EnrichError>;
