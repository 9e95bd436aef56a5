//! `InflateError`: unified error type for the sketch-inflate public APIs.
//!
//! Every fallible public entry point returns this error so hosts can match on
//! a single enum instead of juggling per-stage error types.

use thiserror::Error;

/// Unified error type for inflation pipeline operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InflateError {
    /// The caller handed us something unusable (too few points, bad config).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The triangulation collaborator could not triangulate the polygon.
    #[error("triangulation failed: {0}")]
    Triangulation(String),
    /// A pipeline invariant was violated. This is a bug in the pipeline, not
    /// a recoverable input condition.
    #[error("pipeline invariant violated: {0}")]
    Internal(String),
}

impl InflateError {
    /// Shorthand for an [`InflateError::Internal`] with a formatted message.
    pub(crate) fn internal(msg: impl Into<String>) -> Self {
        InflateError::Internal(msg.into())
    }
}
