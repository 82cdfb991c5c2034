//! Error types for subspace operations.
//!
//! Every fallible operation in this crate returns `Result<T, SubspaceError>`.
//! Numerical anomalies that do not stop the computation (rank-deficient
//! scatter, complex eigenvalues) are reported through `tracing` instead.

use thiserror::Error;

use crate::lda::LdaConfigBuilderError;

#[derive(Debug, Error)]
pub enum SubspaceError {
    /// Sample dimension disagrees with the mean vector or projection basis
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Malformed input to `compute`
    #[error("Bad argument: {0}")]
    BadArgument(String),

    /// Fewer than two distinct labels, so no discriminant direction exists
    #[error("Insufficient classes: need at least 2 distinct labels, got {found}")]
    InsufficientClasses { found: usize },

    #[error("Model has not been computed yet")]
    NotFitted,

    #[error("Linear algebra error: {0}")]
    Linalg(#[from] ndarray_linalg::error::LinalgError),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Configuration error: {0}")]
    Config(#[from] LdaConfigBuilderError),
}

impl SubspaceError {
    /// Create a BadArgument error with a message
    pub fn bad_argument(message: impl Into<String>) -> Self {
        Self::BadArgument(message.into())
    }

    /// Create a DimensionMismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}

pub type Result<T> = std::result::Result<T, SubspaceError>;
