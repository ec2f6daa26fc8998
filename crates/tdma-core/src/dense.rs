//! Dense reference solver.
//!
//! Expands a [`TridiagonalSystem`] into a full matrix and solves it by LU
//! decomposition. This is O(N^3) and exists to cross-check the Thomas
//! algorithm, not to replace it.

use nalgebra::{DMatrix, DVector};

use crate::config::DEFAULT_PIVOT_EPSILON;
use crate::error::{TdmaError, TdmaResult};
use crate::tridiagonal::{SystemSolver, TridiagonalSystem};

impl TridiagonalSystem {
    /// Builds the dense matrix `A` and vector `d` with `A * x = d`.
    ///
    /// Row `i` of `A` holds `-c[i]` at column `i-1`, `a[i]` at `i` and
    /// `-b[i]` at `i+1`.
    #[must_use]
    pub fn to_dense(&self) -> (DMatrix<f64>, DVector<f64>) {
        let n = self.len();
        let mut matrix = DMatrix::zeros(n, n);
        for (i, row) in self.rows().enumerate() {
            matrix[(i, i)] = row.main;
            if i > 0 {
                matrix[(i, i - 1)] = -row.lower;
            }
            if i + 1 < n {
                matrix[(i, i + 1)] = -row.upper;
            }
        }
        (matrix, DVector::from_column_slice(self.rhs()))
    }
}

/// Performs LU decomposition of a square matrix.
///
/// Returns matrices L and U such that A = L * U, where L is unit lower
/// triangular and U is upper triangular. No pivoting is performed, which
/// mirrors the elimination order of the Thomas algorithm.
pub fn lu_decomposition(
    matrix: &DMatrix<f64>,
    pivot_epsilon: f64,
) -> TdmaResult<(DMatrix<f64>, DMatrix<f64>)> {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return Err(TdmaError::invalid_input(
            "Matrix must be square for LU decomposition",
        ));
    }

    let mut l = DMatrix::identity(n, n);
    let mut u = matrix.clone();

    for k in 0..n {
        if u[(k, k)].abs() <= pivot_epsilon {
            return Err(TdmaError::singular(k, u[(k, k)]));
        }

        for i in k + 1..n {
            let factor = u[(i, k)] / u[(k, k)];
            l[(i, k)] = factor;

            for j in k..n {
                u[(i, j)] -= factor * u[(k, j)];
            }
        }
    }

    Ok((l, u))
}

/// Solves a linear system Ax = b using LU decomposition.
pub fn solve_linear_system(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    pivot_epsilon: f64,
) -> TdmaResult<DVector<f64>> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(TdmaError::invalid_input("Matrix must be square"));
    }
    if n != b.len() {
        return Err(TdmaError::dimension_mismatch("rhs", n, b.len()));
    }

    let (l, u) = lu_decomposition(a, pivot_epsilon)?;

    // Solve Ly = b (forward substitution)
    let mut y = DVector::zeros(n);
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[(i, j)] * y[j];
        }
        y[i] = sum / l[(i, i)];
    }

    // Solve Ux = y (back substitution)
    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in i + 1..n {
            sum -= u[(i, j)] * x[j];
        }
        x[i] = sum / u[(i, i)];
    }

    if let Some(row) = x.iter().position(|v: &f64| !v.is_finite()) {
        return Err(TdmaError::NonFinite { row });
    }

    Ok(x)
}

/// Solves tridiagonal systems through their dense form.
#[derive(Debug, Clone, Copy)]
pub struct DenseLuSolver {
    pivot_epsilon: f64,
}

impl Default for DenseLuSolver {
    fn default() -> Self {
        Self {
            pivot_epsilon: DEFAULT_PIVOT_EPSILON,
        }
    }
}

impl DenseLuSolver {
    /// Creates a dense solver with the given pivot threshold.
    #[must_use]
    pub fn new(pivot_epsilon: f64) -> Self {
        Self { pivot_epsilon }
    }
}

impl SystemSolver for DenseLuSolver {
    fn solve_system(&self, system: &TridiagonalSystem) -> TdmaResult<Vec<f64>> {
        let (a, d) = system.to_dense();
        let x = solve_linear_system(&a, &d, self.pivot_epsilon)?;
        Ok(x.iter().copied().collect())
    }

    fn name(&self) -> &'static str {
        "Dense LU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tridiagonal::TridiagonalSolver;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_dense() {
        let system = TridiagonalSystem::new(
            vec![4.0, 5.0, 6.0],
            vec![1.0, 2.0, 99.0],
            vec![99.0, 3.0, 4.0],
            vec![1.0, 2.0, 3.0],
        )
        .unwrap();
        let (a, d) = system.to_dense();

        let expected = DMatrix::from_row_slice(
            3,
            3,
            &[4.0, -1.0, 0.0, -3.0, 5.0, -2.0, 0.0, -4.0, 6.0],
        );
        assert_eq!(a, expected);
        assert_eq!(d, DVector::from_vec(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_lu_decomposition() {
        let a = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, 1.0, 4.0, 3.0, 3.0, 8.0, 7.0, 9.0]);

        let (l, u) = lu_decomposition(&a, DEFAULT_PIVOT_EPSILON).unwrap();

        // Verify L * U = A
        let product = &l * &u;
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(product[(i, j)], a[(i, j)], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_solve_linear_system() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![5.0, 5.0]);

        let x = solve_linear_system(&a, &b, DEFAULT_PIVOT_EPSILON).unwrap();

        assert_relative_eq!(x[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_singular_matrix() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);
        let err = solve_linear_system(&a, &b, DEFAULT_PIVOT_EPSILON).unwrap_err();
        assert!(matches!(err, TdmaError::SingularSystem { row: 1, .. }));
    }

    #[test]
    fn test_dense_matches_thomas() {
        let system = TridiagonalSystem::new(
            vec![600.0, 400.0, 600.0],
            vec![200.0, 200.0, 0.0],
            vec![0.0, 200.0, 200.0],
            vec![200_000.0, 0.0, 120_000.0],
        )
        .unwrap();

        let thomas = TridiagonalSolver::default().solve(&system).unwrap();
        let dense = DenseLuSolver::default().solve_system(&system).unwrap();
        for (t, d) in thomas.iter().zip(&dense) {
            assert_relative_eq!(*t, *d, max_relative = 1e-12);
        }
    }
}
