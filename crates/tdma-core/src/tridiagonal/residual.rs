//! Residual checks for a computed solution.

use super::system::TridiagonalSystem;
use crate::error::{TdmaError, TdmaResult};

/// Computes `a[i]*phi[i] - b[i]*phi[i+1] - c[i]*phi[i-1] - d[i]` for every row.
///
/// Terms that would reference `phi[-1]` or `phi[N]` are omitted. A zero
/// vector means `phi` solves the system exactly.
pub fn residuals(system: &TridiagonalSystem, phi: &[f64]) -> TdmaResult<Vec<f64>> {
    let n = system.len();
    if phi.len() != n {
        return Err(TdmaError::dimension_mismatch("phi", n, phi.len()));
    }

    Ok(system
        .rows()
        .enumerate()
        .map(|(i, row)| {
            let mut r = row.main * phi[i] - row.rhs;
            if i > 0 {
                r -= row.lower * phi[i - 1];
            }
            if i + 1 < n {
                r -= row.upper * phi[i + 1];
            }
            r
        })
        .collect())
}

/// Returns `(row, value)` of the largest relative residual.
///
/// Each row is scaled by `max(1, |d[i]|, |a[i]*phi[i]|)` so large
/// coefficients do not mask or exaggerate rounding error.
pub fn max_relative_residual(system: &TridiagonalSystem, phi: &[f64]) -> TdmaResult<(usize, f64)> {
    let raw = residuals(system, phi)?;

    let mut worst = (0, 0.0_f64);
    for (i, (r, row)) in raw.iter().zip(system.rows()).enumerate() {
        let scale = 1.0_f64.max(row.rhs.abs()).max((row.main * phi[i]).abs());
        let rel = r.abs() / scale;
        // NaN compares false, so catch it explicitly
        if rel.is_nan() {
            return Ok((i, f64::NAN));
        }
        if rel > worst.1 {
            worst = (i, rel);
        }
    }
    Ok(worst)
}

/// Checks that `phi` satisfies every row within `tolerance` (relative).
pub fn verify_solution(system: &TridiagonalSystem, phi: &[f64], tolerance: f64) -> TdmaResult<()> {
    let (row, residual) = max_relative_residual(system, phi)?;
    if residual.is_nan() || residual > tolerance {
        return Err(TdmaError::ResidualExceeded {
            row,
            residual,
            tolerance,
        });
    }
    Ok(())
}
