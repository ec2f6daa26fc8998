//! # TDMA Core
//!
//! Tridiagonal Matrix Algorithm (Thomas algorithm) for linear systems whose
//! matrix is tridiagonal.
//!
//! This crate provides:
//!
//! - **Systems**: [`TridiagonalSystem`] with validated, index-aligned coefficients
//! - **Solver**: [`TridiagonalSolver`], O(N) forward sweep + back substitution
//! - **Residuals**: verification that a solution satisfies its system
//! - **Dense reference**: LU solve of the expanded matrix for cross-checking
//! - **Batch**: parallel solving of independent systems
//!
//! ## Example
//!
//! ```rust
//! use tdma_core::prelude::*;
//!
//! // Three-cell conduction, Dirichlet 500 / 300, gamma / dx = 200
//! let phi = solve_tridiagonal(
//!     &[600.0, 400.0, 600.0],
//!     &[200.0, 200.0, 0.0],
//!     &[0.0, 200.0, 200.0],
//!     &[200_000.0, 0.0, 120_000.0],
//! )
//! .unwrap();
//!
//! assert!((phi[1] - 400.0).abs() < 1e-9);
//! ```
//!
//! ## Design Philosophy
//!
//! - **Pure**: a solve holds no state and performs no I/O
//! - **Explicit failure**: singular or non-finite systems are errors, never `NaN` results
//! - **Explicit boundaries**: the unused `c[0]` / `b[N-1]` slots are documented and ignored

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]

pub mod batch;
pub mod config;
pub mod dense;
pub mod error;
pub mod tridiagonal;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::batch::BatchSolver;
    pub use crate::config::SolverConfig;
    pub use crate::dense::DenseLuSolver;
    pub use crate::error::{TdmaError, TdmaResult};
    pub use crate::tridiagonal::{
        max_relative_residual, residuals, solve_tridiagonal, verify_solution, DiagonalDominance,
        SystemSolver, TridiagonalSolver, TridiagonalSystem,
    };
}

pub use config::SolverConfig;
pub use error::{TdmaError, TdmaResult};
pub use tridiagonal::{solve_tridiagonal, TridiagonalSolver, TridiagonalSystem};
