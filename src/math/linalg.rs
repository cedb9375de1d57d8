//! Linear algebra backend abstraction for weighted least squares.
//!
//! ## Purpose
//!
//! This module provides a trait-based abstraction over the one dense solve the
//! approximator needs: the weighted normal equations `X'WX * beta = X'Wy`.
//!
//! ## Design notes
//!
//! * Uses a singular value decomposition of `X'WX` so rank can be checked
//!   before solving.
//! * Rank-deficient systems return `None`. There is no pseudo-inverse
//!   fallback; callers turn `None` into a degeneracy error.
//! * Generic over `FloatLinalg` types (f32 and f64) which delegate to nalgebra.

// External dependencies
use core::fmt::{Debug, Display};
use core::str::FromStr;
use num_traits::Float;

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Relative tolerance factor applied to machine epsilon in the rank test.
const RANK_TOLERANCE_FACTOR: f64 = 100.0;

/// Helper trait to bridge generic Float types to the nalgebra backend.
pub trait FloatLinalg: Float + Debug + Display + FromStr + Send + Sync + 'static {
    /// Solve the symmetric system `X'WX * beta = X'Wy`.
    ///
    /// `xtw_x` is `n x n` (symmetric, so row/column-major is irrelevant) and
    /// `xtw_y` has length `n`. Returns `None` when the matrix is rank deficient.
    fn solve_normal(xtw_x: &[Self], xtw_y: &[Self], n: usize) -> Option<Vec<Self>>;
}

impl FloatLinalg for f64 {
    #[inline]
    fn solve_normal(xtw_x: &[Self], xtw_y: &[Self], n: usize) -> Option<Vec<Self>> {
        let scale = n as f64 * f64::EPSILON * RANK_TOLERANCE_FACTOR;
        nalgebra_backend::solve_normal_equations(xtw_x, xtw_y, n, scale)
    }
}

impl FloatLinalg for f32 {
    #[inline]
    fn solve_normal(xtw_x: &[Self], xtw_y: &[Self], n: usize) -> Option<Vec<Self>> {
        let scale = n as f32 * f32::EPSILON * RANK_TOLERANCE_FACTOR as f32;
        nalgebra_backend::solve_normal_equations(xtw_x, xtw_y, n, scale)
    }
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based linear algebra operations.
pub mod nalgebra_backend {
    use nalgebra::{DMatrix, DVector, RealField};

    /// Solve normal equations with a rank check.
    ///
    /// Singular values below `largest * tolerance_scale` count as zero. The
    /// system is solved only if it has full rank.
    pub fn solve_normal_equations<T: RealField + Copy>(
        xtw_x: &[T],
        xtw_y: &[T],
        n_coeffs: usize,
        tolerance_scale: T,
    ) -> Option<Vec<T>> {
        debug_assert_eq!(xtw_x.len(), n_coeffs * n_coeffs);
        debug_assert_eq!(xtw_y.len(), n_coeffs);

        // SVD iterations need not terminate on NaN input
        if !xtw_x.iter().chain(xtw_y).all(|v| v.is_finite()) {
            return None;
        }

        let matrix = DMatrix::from_column_slice(n_coeffs, n_coeffs, xtw_x);
        let rhs = DVector::from_column_slice(xtw_y);

        let svd = matrix.svd(true, true);
        let largest = svd
            .singular_values
            .iter()
            .fold(T::zero(), |acc, &s| if s > acc { s } else { acc });
        if largest <= T::zero() || !largest.is_finite() {
            return None;
        }

        let tolerance = largest * tolerance_scale;
        if svd.rank(tolerance) < n_coeffs {
            return None;
        }

        svd.solve(&rhs, tolerance)
            .ok()
            .map(|s: DVector<T>| s.as_slice().to_vec())
    }
}
