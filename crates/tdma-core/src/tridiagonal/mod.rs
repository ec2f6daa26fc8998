//! Tridiagonal systems and the Thomas algorithm.
//!
//! - [`TridiagonalSystem`]: validated coefficient storage with an explicit
//!   boundary convention
//! - [`TridiagonalSolver`]: forward elimination + back substitution
//! - [`residual`]: checks that a solution satisfies its system
//!
//! # Sign convention
//!
//! Row `i` is written with the neighbours on the right-hand side:
//!
//! ```text
//! a[i] * x[i] = b[i] * x[i+1] + c[i] * x[i-1] + d[i]
//! ```
//!
//! so for a conduction problem `a`, `b` and `c` are all positive. The
//! forward sweep uses `+c[i] * Q[i-1]` accordingly. In matrix form the
//! off-diagonals are `-b` and `-c` (see [`TridiagonalSystem::to_dense`]).

pub mod residual;
mod solver;
mod system;

pub use residual::{max_relative_residual, residuals, verify_solution};
pub use solver::{solve_tridiagonal, Sweep, TridiagonalSolver};
pub use system::{DiagonalDominance, Row, TridiagonalSystem};

use crate::error::TdmaResult;

/// A method for solving a [`TridiagonalSystem`].
///
/// Implemented by the Thomas solver and the dense LU reference solver, so
/// callers such as [`crate::batch::BatchSolver`] can swap between them.
pub trait SystemSolver: Send + Sync {
    /// Solves the system and returns the unknowns in row order.
    fn solve_system(&self, system: &TridiagonalSystem) -> TdmaResult<Vec<f64>>;

    /// Returns the name of the method.
    fn name(&self) -> &'static str;
}
