//! Coefficient storage for a tridiagonal system.

use crate::error::{TdmaError, TdmaResult};

/// A linear system whose matrix is tridiagonal.
///
/// Row `i` reads
///
/// ```text
/// a[i] * x[i] = b[i] * x[i+1] + c[i] * x[i-1] + d[i]
/// ```
///
/// where `a` is the main diagonal, `b` the super-diagonal, `c` the
/// sub-diagonal and `d` the right-hand side. All four sequences have
/// length `N >= 1`.
///
/// `c[0]` and `b[N-1]` would couple to unknowns that do not exist. They are
/// stored so the four sequences stay index-aligned, but nothing in this
/// crate reads them: any value supplied there has no effect on a solve, a
/// residual or the dense form.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    main: Vec<f64>,
    upper: Vec<f64>,
    lower: Vec<f64>,
    rhs: Vec<f64>,
}

/// The four coefficients of one equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    /// Coefficient of `x[i-1]` (`c[i]`), zero for the first row.
    pub lower: f64,
    /// Coefficient of `x[i]` (`a[i]`).
    pub main: f64,
    /// Coefficient of `x[i+1]` (`b[i]`), zero for the last row.
    pub upper: f64,
    /// Constant term (`d[i]`).
    pub rhs: f64,
}

/// How strongly the main diagonal dominates its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagonalDominance {
    /// `|a[i]| > |b[i]| + |c[i]|` on every row.
    Strict,
    /// `|a[i]| >= |b[i]| + |c[i]|` on every row, strictly on at least one.
    Weak,
    /// Some row is not dominated, or no row is strictly dominated.
    None,
}

impl DiagonalDominance {
    /// Returns true when elimination is guaranteed not to break down.
    ///
    /// Weak dominance only guarantees this for irreducible matrices, i.e.
    /// when no off-diagonal coupling is zero.
    #[must_use]
    pub fn is_sufficient(self) -> bool {
        matches!(self, Self::Strict | Self::Weak)
    }
}

/// Checks that four coefficient sequences share a non-zero length.
///
/// Returns the common length `N`.
pub(crate) fn check_dimensions(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> TdmaResult<usize> {
    let n = a.len();
    for (name, len) in [("b", b.len()), ("c", c.len()), ("d", d.len())] {
        if len != n {
            return Err(TdmaError::dimension_mismatch(name, n, len));
        }
    }
    if n == 0 {
        return Err(TdmaError::insufficient_data(1, 0));
    }
    Ok(n)
}

impl TridiagonalSystem {
    /// Creates a system from four index-aligned sequences.
    ///
    /// # Arguments
    ///
    /// * `a` - Main diagonal (length N)
    /// * `b` - Super-diagonal (length N, `b[N-1]` unused)
    /// * `c` - Sub-diagonal (length N, `c[0]` unused)
    /// * `d` - Right-hand side (length N)
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the lengths differ, `InsufficientData` if
    /// they are all empty.
    pub fn new(
        a: impl Into<Vec<f64>>,
        b: impl Into<Vec<f64>>,
        c: impl Into<Vec<f64>>,
        d: impl Into<Vec<f64>>,
    ) -> TdmaResult<Self> {
        let (main, upper, lower, rhs) = (a.into(), b.into(), c.into(), d.into());
        check_dimensions(&main, &upper, &lower, &rhs)?;
        Ok(Self {
            main,
            upper,
            lower,
            rhs,
        })
    }

    /// Creates a system from compact bands.
    ///
    /// `lower` and `upper` hold only the N-1 meaningful off-diagonal
    /// entries; the boundary slots are filled with zero.
    ///
    /// ```text
    /// lower[i] multiplies x[i]   in row i+1
    /// upper[i] multiplies x[i+1] in row i
    /// ```
    pub fn from_bands(
        lower: &[f64],
        main: &[f64],
        upper: &[f64],
        rhs: &[f64],
    ) -> TdmaResult<Self> {
        let n = main.len();
        if n == 0 {
            return Err(TdmaError::insufficient_data(1, 0));
        }
        if lower.len() != n - 1 {
            return Err(TdmaError::dimension_mismatch("lower", n - 1, lower.len()));
        }
        if upper.len() != n - 1 {
            return Err(TdmaError::dimension_mismatch("upper", n - 1, upper.len()));
        }
        if rhs.len() != n {
            return Err(TdmaError::dimension_mismatch("rhs", n, rhs.len()));
        }

        let mut c = Vec::with_capacity(n);
        c.push(0.0);
        c.extend_from_slice(lower);

        let mut b = Vec::with_capacity(n);
        b.extend_from_slice(upper);
        b.push(0.0);

        Ok(Self {
            main: main.to_vec(),
            upper: b,
            lower: c,
            rhs: rhs.to_vec(),
        })
    }

    /// Number of equations (and unknowns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.main.len()
    }

    /// Always false: a system holds at least one equation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    /// Main diagonal `a`.
    #[must_use]
    pub fn main(&self) -> &[f64] {
        &self.main
    }

    /// Super-diagonal `b`.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Sub-diagonal `c`.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Right-hand side `d`.
    #[must_use]
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Returns row `i`, with the unused boundary coefficients reported as zero.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<Row> {
        let n = self.len();
        if i >= n {
            return None;
        }
        Some(Row {
            lower: if i > 0 { self.lower[i] } else { 0.0 },
            main: self.main[i],
            upper: if i + 1 < n { self.upper[i] } else { 0.0 },
            rhs: self.rhs[i],
        })
    }

    /// Iterates over all rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    /// Classifies the diagonal dominance of the matrix.
    #[must_use]
    pub fn diagonal_dominance(&self) -> DiagonalDominance {
        let mut any_strict = false;
        let mut all_strict = true;

        for row in self.rows() {
            let diag = row.main.abs();
            let off = row.lower.abs() + row.upper.abs();
            if diag > off {
                any_strict = true;
            } else if diag == off {
                all_strict = false;
            } else {
                return DiagonalDominance::None;
            }
        }

        match (all_strict, any_strict) {
            (true, _) => DiagonalDominance::Strict,
            (false, true) => DiagonalDominance::Weak,
            (false, false) => DiagonalDominance::None,
        }
    }

    /// Consumes the system and returns `(a, b, c, d)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.main, self.upper, self.lower, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_lengths() {
        let err = TridiagonalSystem::new(vec![1.0, 2.0], vec![0.0, 0.0], vec![0.0], vec![1.0, 1.0])
            .unwrap_err();
        assert_eq!(err, TdmaError::dimension_mismatch("c", 2, 1));

        let err = TridiagonalSystem::new(vec![], vec![], vec![], vec![]).unwrap_err();
        assert_eq!(err, TdmaError::insufficient_data(1, 0));
    }

    #[test]
    fn test_from_bands_pads_boundaries() {
        let system =
            TridiagonalSystem::from_bands(&[1.0, 2.0], &[4.0, 5.0, 6.0], &[7.0, 8.0], &[1.0, 1.0, 1.0])
                .unwrap();
        assert_eq!(system.lower(), &[0.0, 1.0, 2.0]);
        assert_eq!(system.upper(), &[7.0, 8.0, 0.0]);
        assert_eq!(system.len(), 3);
    }

    #[test]
    fn test_from_bands_rejects_bad_bands() {
        let err = TridiagonalSystem::from_bands(&[1.0], &[4.0, 5.0, 6.0], &[7.0, 8.0], &[1.0; 3])
            .unwrap_err();
        assert_eq!(err, TdmaError::dimension_mismatch("lower", 2, 1));
    }

    #[test]
    fn test_row_hides_unused_coefficients() {
        let system =
            TridiagonalSystem::new(vec![2.0, 2.0], vec![1.0, 99.0], vec![99.0, 1.0], vec![3.0, 3.0])
                .unwrap();
        let first = system.row(0).unwrap();
        assert_eq!(first.lower, 0.0);
        assert_eq!(first.upper, 1.0);
        let last = system.row(1).unwrap();
        assert_eq!(last.upper, 0.0);
        assert_eq!(last.lower, 1.0);
        assert!(system.row(2).is_none());
    }

    #[test]
    fn test_diagonal_dominance() {
        let strict =
            TridiagonalSystem::new(vec![4.0; 3], vec![1.0, 1.0, 0.0], vec![0.0, 1.0, 1.0], vec![1.0; 3])
                .unwrap();
        assert_eq!(strict.diagonal_dominance(), DiagonalDominance::Strict);

        // 1D Laplacian: interior rows are only weakly dominated
        let weak =
            TridiagonalSystem::new(vec![2.0; 3], vec![1.0, 1.0, 0.0], vec![0.0, 1.0, 1.0], vec![1.0; 3])
                .unwrap();
        assert_eq!(weak.diagonal_dominance(), DiagonalDominance::Weak);

        let none = TridiagonalSystem::new(
            vec![300.0, 200.0, 300.0],
            vec![200.0, 200.0, 0.0],
            vec![0.0, 200.0, 200.0],
            vec![1.0; 3],
        )
        .unwrap();
        assert_eq!(none.diagonal_dominance(), DiagonalDominance::None);
        assert!(!none.diagonal_dominance().is_sufficient());
    }
}
