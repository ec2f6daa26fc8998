//! Thomas algorithm: forward elimination followed by back substitution.

use log::{debug, log_enabled, trace, Level};

use super::residual::verify_solution;
use super::system::{check_dimensions, TridiagonalSystem};
use super::SystemSolver;
use crate::config::SolverConfig;
use crate::error::{TdmaError, TdmaResult};

/// Recursion coefficients produced by the forward sweep.
///
/// After elimination every unknown satisfies
/// `x[i] = P[i] * x[i+1] + Q[i]`, with `P[N-1] = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    p: Vec<f64>,
    q: Vec<f64>,
}

impl Sweep {
    /// The `P` coefficients.
    #[must_use]
    pub fn p(&self) -> &[f64] {
        &self.p
    }

    /// The `Q` coefficients.
    #[must_use]
    pub fn q(&self) -> &[f64] {
        &self.q
    }

    /// Runs back substitution and returns the solution.
    ///
    /// `phi[N-1] = Q[N-1]`, then `phi[i] = P[i] * phi[i+1] + Q[i]` from
    /// `N-2` down to `0`. The `Q` buffer is reused for the result.
    #[must_use]
    pub fn back_substitute(self) -> Vec<f64> {
        let Self { p, q: mut phi } = self;
        for i in (0..phi.len().saturating_sub(1)).rev() {
            phi[i] += p[i] * phi[i + 1];
        }
        phi
    }
}

/// Tridiagonal solver using the Thomas algorithm.
///
/// O(N) time and O(N) auxiliary space. The solver holds only its
/// configuration, so one instance can be shared freely across threads.
///
/// # Example
///
/// ```rust
/// use tdma_core::tridiagonal::{TridiagonalSolver, TridiagonalSystem};
///
/// let system = TridiagonalSystem::new(
///     vec![2.0, 2.0, 2.0],
///     vec![0.0, 0.0, 0.0],
///     vec![0.0, 0.0, 0.0],
///     vec![4.0, 6.0, 8.0],
/// )
/// .unwrap();
///
/// let phi = TridiagonalSolver::default().solve(&system).unwrap();
/// assert_eq!(phi, vec![2.0, 3.0, 4.0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TridiagonalSolver {
    config: SolverConfig,
}

impl TridiagonalSolver {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Creates a solver after checking the configuration.
    pub fn validated(config: SolverConfig) -> TdmaResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the solver configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `system` and returns the unknowns in row order.
    ///
    /// # Errors
    ///
    /// - `SingularSystem` if an elimination denominator is within
    ///   `pivot_epsilon` of zero
    /// - `NonFinite` if NaN or infinity appears anywhere in the solve
    /// - `ResidualExceeded` if verification is enabled and fails
    pub fn solve(&self, system: &TridiagonalSystem) -> TdmaResult<Vec<f64>> {
        trace!("thomas solve: n = {}", system.len());
        if log_enabled!(Level::Debug) && !system.diagonal_dominance().is_sufficient() {
            debug!(
                "system of size {} is not diagonally dominant; elimination may be unstable",
                system.len()
            );
        }

        let phi = self.forward_sweep(system)?.back_substitute();
        check_finite(&phi)?;

        if self.config.verify_residual {
            verify_solution(system, &phi, self.config.residual_tolerance)?;
        }

        Ok(phi)
    }

    /// Solves four index-aligned coefficient slices without copying them.
    ///
    /// Residual verification, when enabled, requires a [`TridiagonalSystem`]
    /// and copies the coefficients only for that check.
    pub fn solve_slices(&self, a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> TdmaResult<Vec<f64>> {
        if self.config.verify_residual {
            let system = TridiagonalSystem::new(a, b, c, d)?;
            return self.solve(&system);
        }

        check_dimensions(a, b, c, d)?;
        let phi = self.sweep_slices(a, b, c, d)?.back_substitute();
        check_finite(&phi)?;
        Ok(phi)
    }

    /// Runs forward elimination only.
    pub fn forward_sweep(&self, system: &TridiagonalSystem) -> TdmaResult<Sweep> {
        self.sweep_slices(system.main(), system.upper(), system.lower(), system.rhs())
    }

    /// Forward elimination over validated slices of equal length `N >= 1`.
    ///
    /// `c[0]` and `b[N-1]` are never read.
    fn sweep_slices(&self, a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> TdmaResult<Sweep> {
        let n = a.len();
        let last = n - 1;
        let mut p = vec![0.0; n];
        let mut q = vec![0.0; n];

        let pivot = self.check_pivot(0, a[0])?;
        if last > 0 {
            p[0] = b[0] / pivot;
        }
        q[0] = d[0] / pivot;
        check_coefficients(0, p[0], q[0])?;

        for i in 1..n {
            let denom = self.check_pivot(i, a[i] - c[i] * p[i - 1])?;
            if i < last {
                p[i] = b[i] / denom;
            }
            q[i] = (d[i] + c[i] * q[i - 1]) / denom;
            check_coefficients(i, p[i], q[i])?;
        }

        Ok(Sweep { p, q })
    }

    fn check_pivot(&self, row: usize, pivot: f64) -> TdmaResult<f64> {
        if !pivot.is_finite() {
            return Err(TdmaError::NonFinite { row });
        }
        if pivot.abs() <= self.config.pivot_epsilon {
            debug!("singular pivot {pivot:e} at row {row}");
            return Err(TdmaError::singular(row, pivot));
        }
        Ok(pivot)
    }
}

impl SystemSolver for TridiagonalSolver {
    fn solve_system(&self, system: &TridiagonalSystem) -> TdmaResult<Vec<f64>> {
        self.solve(system)
    }

    fn name(&self) -> &'static str {
        "Thomas"
    }
}

fn check_coefficients(row: usize, p: f64, q: f64) -> TdmaResult<()> {
    if p.is_finite() && q.is_finite() {
        Ok(())
    } else {
        Err(TdmaError::NonFinite { row })
    }
}

fn check_finite(phi: &[f64]) -> TdmaResult<()> {
    match phi.iter().position(|v| !v.is_finite()) {
        Some(row) => Err(TdmaError::NonFinite { row }),
        None => Ok(()),
    }
}

/// Solves a tridiagonal system with the default configuration.
///
/// The system has the form:
/// ```text
/// a[i] * x[i] = b[i] * x[i+1] + c[i] * x[i-1] + d[i]
/// ```
///
/// # Arguments
///
/// * `a` - Main diagonal (length n)
/// * `b` - Super-diagonal (length n, last entry unused)
/// * `c` - Sub-diagonal (length n, first entry unused)
/// * `d` - Right-hand side (length n)
///
/// # Returns
///
/// Solution vector x.
pub fn solve_tridiagonal(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> TdmaResult<Vec<f64>> {
    TridiagonalSolver::default().solve_slices(a, b, c, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diagonal_system() {
        let x = solve_tridiagonal(&[2.0, 2.0, 2.0], &[0.0; 3], &[0.0; 3], &[4.0, 6.0, 8.0]).unwrap();
        assert_eq!(x, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_single_equation() {
        let x = solve_tridiagonal(&[4.0], &[0.0], &[0.0], &[10.0]).unwrap();
        assert_eq!(x, vec![2.5]);
    }

    #[test]
    fn test_single_equation_ignores_boundary_slots() {
        let x = solve_tridiagonal(&[4.0], &[f64::NAN], &[f64::NAN], &[10.0]).unwrap();
        assert_eq!(x, vec![2.5]);
    }

    #[test]
    fn test_coupled_system() {
        // 2x0 = x1 + 1, 2x1 = x0 + 1  =>  x0 = x1 = 1
        let x = solve_tridiagonal(&[2.0, 2.0], &[1.0, 0.0], &[0.0, 1.0], &[1.0, 1.0]).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = solve_tridiagonal(&[1.0, 1.0], &[0.0, 0.0], &[0.0, 0.0], &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            TdmaError::DimensionMismatch {
                sequence: "d",
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_empty_system() {
        let err = solve_tridiagonal(&[], &[], &[], &[]).unwrap_err();
        assert_eq!(err, TdmaError::insufficient_data(1, 0));
    }

    #[test]
    fn test_zero_first_pivot() {
        let err = solve_tridiagonal(&[0.0, 1.0], &[1.0, 0.0], &[0.0, 1.0], &[1.0, 1.0]).unwrap_err();
        assert_eq!(err, TdmaError::singular(0, 0.0));
    }

    #[test]
    fn test_zero_interior_pivot() {
        // Row 1 denominator: 1 - 1 * (1 / 1) = 0
        let err = solve_tridiagonal(&[1.0, 1.0], &[1.0, 0.0], &[0.0, 1.0], &[1.0, 1.0]).unwrap_err();
        assert!(matches!(err, TdmaError::SingularSystem { row: 1, .. }));
    }

    #[test]
    fn test_pivot_epsilon_is_configurable() {
        let a = [1e-12, 1.0];
        let b = [0.0, 0.0];
        let c = [0.0, 0.0];
        let d = [1.0, 1.0];

        assert!(solve_tridiagonal(&a, &b, &c, &d).is_ok());

        let strict = TridiagonalSolver::new(SolverConfig::default().with_pivot_epsilon(1e-9));
        assert!(strict.solve_slices(&a, &b, &c, &d).unwrap_err().is_singular());
    }

    #[test]
    fn test_nan_input_is_rejected() {
        let err = solve_tridiagonal(&[1.0, 1.0], &[0.0, 0.0], &[0.0, 0.0], &[f64::NAN, 1.0]).unwrap_err();
        assert_eq!(err, TdmaError::NonFinite { row: 0 });
    }

    #[test]
    fn test_overflow_is_rejected() {
        let err = solve_tridiagonal(&[1e-10], &[0.0], &[0.0], &[1e300]).unwrap_err();
        assert_eq!(err, TdmaError::NonFinite { row: 0 });
    }

    #[test]
    fn test_forward_sweep_coefficients() {
        let system = TridiagonalSystem::new(
            vec![300.0, 200.0, 300.0],
            vec![200.0, 200.0, 0.0],
            vec![0.0, 200.0, 200.0],
            vec![200_000.0, 0.0, 120_000.0],
        )
        .unwrap();

        let sweep = TridiagonalSolver::default().forward_sweep(&system).unwrap();
        assert_relative_eq!(sweep.p()[0], 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(sweep.p()[1], 3.0, epsilon = 1e-12);
        assert_eq!(sweep.p()[2], 0.0);
        assert_relative_eq!(sweep.q()[1], 2000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_verification_enabled() {
        let solver = TridiagonalSolver::new(SolverConfig::default().with_verification(true));
        let x = solver
            .solve_slices(&[4.0, 4.0], &[1.0, 0.0], &[0.0, 1.0], &[5.0, 5.0])
            .unwrap();
        assert_relative_eq!(x[0], 5.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_validated_rejects_bad_config() {
        assert!(TridiagonalSolver::validated(SolverConfig::new(-1.0, 1e-9)).is_err());
        assert!(TridiagonalSolver::validated(SolverConfig::default()).is_ok());
    }
}
