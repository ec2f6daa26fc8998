//! Batch solving of independent systems.
//!
//! Each solve is a pure function of its own coefficients, so a batch can be
//! spread across threads without synchronisation. With the `parallel`
//! feature (on by default) the work is distributed with rayon; otherwise
//! the systems are solved one after another.

use crate::error::TdmaResult;
use crate::tridiagonal::{SystemSolver, TridiagonalSolver, TridiagonalSystem};

/// Solves many independent tridiagonal systems.
///
/// Results are returned in input order. A failure in one system is reported
/// in its own slot and never affects the others.
#[derive(Debug, Clone, Default)]
pub struct BatchSolver<S = TridiagonalSolver> {
    solver: S,
}

impl<S: SystemSolver> BatchSolver<S> {
    /// Creates a batch solver around `solver`.
    #[must_use]
    pub fn new(solver: S) -> Self {
        Self { solver }
    }

    /// Returns the underlying solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Solves every system, in parallel.
    #[cfg(feature = "parallel")]
    pub fn solve_all(&self, systems: &[TridiagonalSystem]) -> Vec<TdmaResult<Vec<f64>>> {
        use rayon::prelude::*;

        log::debug!(
            "{} batch of {} systems (parallel)",
            self.solver.name(),
            systems.len()
        );
        systems
            .par_iter()
            .map(|system| self.solver.solve_system(system))
            .collect()
    }

    /// Solves every system sequentially.
    #[cfg(not(feature = "parallel"))]
    pub fn solve_all(&self, systems: &[TridiagonalSystem]) -> Vec<TdmaResult<Vec<f64>>> {
        log::debug!(
            "{} batch of {} systems (sequential)",
            self.solver.name(),
            systems.len()
        );
        systems
            .iter()
            .map(|system| self.solver.solve_system(system))
            .collect()
    }

    /// Solves every system, failing on the first error in input order.
    pub fn try_solve_all(&self, systems: &[TridiagonalSystem]) -> TdmaResult<Vec<Vec<f64>>> {
        self.solve_all(systems).into_iter().collect()
    }
}
