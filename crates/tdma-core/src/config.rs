//! Solver configuration.

use crate::error::{TdmaError, TdmaResult};

/// Default threshold below which an elimination pivot is treated as zero.
pub const DEFAULT_PIVOT_EPSILON: f64 = 1e-15;

/// Default relative tolerance for residual verification.
pub const DEFAULT_RESIDUAL_TOLERANCE: f64 = 1e-9;

/// Configuration for the Thomas algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// A denominator with `|denom| <= pivot_epsilon` is singular.
    pub pivot_epsilon: f64,
    /// Relative tolerance used when verifying residuals.
    pub residual_tolerance: f64,
    /// Verify the residual after every solve.
    pub verify_residual: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_epsilon: DEFAULT_PIVOT_EPSILON,
            residual_tolerance: DEFAULT_RESIDUAL_TOLERANCE,
            verify_residual: false,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(pivot_epsilon: f64, residual_tolerance: f64) -> Self {
        Self {
            pivot_epsilon,
            residual_tolerance,
            verify_residual: false,
        }
    }

    /// Sets the pivot epsilon.
    #[must_use]
    pub fn with_pivot_epsilon(mut self, pivot_epsilon: f64) -> Self {
        self.pivot_epsilon = pivot_epsilon;
        self
    }

    /// Sets the residual tolerance.
    #[must_use]
    pub fn with_residual_tolerance(mut self, residual_tolerance: f64) -> Self {
        self.residual_tolerance = residual_tolerance;
        self
    }

    /// Enables or disables post-solve residual verification.
    #[must_use]
    pub fn with_verification(mut self, enabled: bool) -> Self {
        self.verify_residual = enabled;
        self
    }

    /// Checks that both tolerances are finite and non-negative.
    pub fn validate(&self) -> TdmaResult<()> {
        if !self.pivot_epsilon.is_finite() || self.pivot_epsilon < 0.0 {
            return Err(TdmaError::invalid_input(format!(
                "pivot epsilon must be finite and non-negative, got {}",
                self.pivot_epsilon
            )));
        }
        if !self.residual_tolerance.is_finite() || self.residual_tolerance < 0.0 {
            return Err(TdmaError::invalid_input(format!(
                "residual tolerance must be finite and non-negative, got {}",
                self.residual_tolerance
            )));
        }
        Ok(())
    }
}
