//! Error types for the load-reconcile library.

use thiserror::Error;

/// Result type alias for load-reconcile operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;

/// Errors raised by the validating constructors of this crate.
///
/// The signal-conditioning and reconciliation algorithms themselves are total
/// and never return these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconcileError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp could not be normalized, or a series is out of order.
    #[error("timestamp error: {0}")]
    TimestampError(String),
}
