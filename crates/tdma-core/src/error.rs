//! Error types for tridiagonal solves.

use thiserror::Error;

/// A specialized Result type for tridiagonal operations.
pub type TdmaResult<T> = Result<T, TdmaError>;

/// Errors that can occur while building or solving a tridiagonal system.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TdmaError {
    /// Input sequences do not share the same length.
    #[error("Dimension mismatch: {sequence} has length {actual}, expected {expected}")]
    DimensionMismatch {
        /// Name of the offending sequence.
        sequence: &'static str,
        /// Length every sequence must have.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// An elimination denominator is zero or numerically negligible.
    #[error("Singular system: pivot {pivot:.2e} at row {row}")]
    SingularSystem {
        /// Row at which elimination broke down.
        row: usize,
        /// The negligible denominator.
        pivot: f64,
    },

    /// A NaN or infinite value appeared during the solve.
    #[error("Non-finite value encountered at row {row}")]
    NonFinite {
        /// Row at which the value appeared.
        row: usize,
    },

    /// Insufficient data for the operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required equations.
        required: usize,
        /// Actual number of equations.
        actual: usize,
    },

    /// A solution does not satisfy its system.
    #[error("Residual {residual:.2e} at row {row} exceeds tolerance {tolerance:.2e}")]
    ResidualExceeded {
        /// Row with the largest residual.
        row: usize,
        /// Relative residual of that row.
        residual: f64,
        /// Tolerance that was exceeded.
        tolerance: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl TdmaError {
    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(sequence: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            sequence,
            expected,
            actual,
        }
    }

    /// Creates a singular system error.
    #[must_use]
    pub fn singular(row: usize, pivot: f64) -> Self {
        Self::SingularSystem { row, pivot }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Returns true if the error means the matrix cannot be eliminated.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::SingularSystem { .. } | Self::NonFinite { .. })
    }
}
