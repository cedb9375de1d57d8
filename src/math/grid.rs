//! Regular input grids.
//!
//! ## Purpose
//!
//! This module generates evenly spaced samples spanning a box `[min, max]`,
//! one row per grid point. It places kernel centers and produces the inputs
//! for the diagnostic grid export.
//!
//! ## Key concepts
//!
//! * **Ordering**: Row-major over dimensions; the last dimension varies fastest.
//! * **Degenerate axes**: A dimension with one sample sits at its `min`.
//!
//! ## Invariants
//!
//! * `min`, `max`, and `n_samples_per_dim` have equal length.
//! * The grid has `product(n_samples_per_dim)` rows.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::RlsError;

/// Check that grid bounds and counts describe a non-empty box.
pub fn check_grid<T: Float>(
    min: &[T],
    max: &[T],
    n_samples_per_dim: &[usize],
) -> Result<(), RlsError> {
    if min.is_empty() {
        return Err(RlsError::InvalidGrid("grid has no dimensions".to_string()));
    }
    if min.len() != max.len() || min.len() != n_samples_per_dim.len() {
        return Err(RlsError::InvalidGrid(format!(
            "dimension mismatch: min has {}, max has {}, n_samples_per_dim has {}",
            min.len(),
            max.len(),
            n_samples_per_dim.len()
        )));
    }
    for (dim, ((&lo, &hi), &n)) in min.iter().zip(max).zip(n_samples_per_dim).enumerate() {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(RlsError::InvalidGrid(format!(
                "bounds of dimension {} are not finite",
                dim
            )));
        }
        if n == 0 {
            return Err(RlsError::InvalidGrid(format!(
                "dimension {} has zero samples",
                dim
            )));
        }
    }
    Ok(())
}

/// Evenly spaced values from `min` to `max` inclusive.
pub fn linspace<T: Float>(min: T, max: T, n: usize) -> Vec<T> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let steps = T::from(n - 1).unwrap_or_else(T::one);
            let step = (max - min) / steps;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        max
                    } else {
                        min + step * T::from(i).unwrap_or_else(T::zero)
                    }
                })
                .collect()
        }
    }
}

/// Generate a regular grid, row-major with `min.len()` columns.
///
/// Callers validate arguments with [`check_grid`] first.
pub fn inputs_grid<T: Float>(min: &[T], max: &[T], n_samples_per_dim: &[usize]) -> Vec<T> {
    let dims = min.len();
    let axes: Vec<Vec<T>> = (0..dims)
        .map(|d| linspace(min[d], max[d], n_samples_per_dim[d]))
        .collect();
    let n_rows: usize = n_samples_per_dim.iter().product();

    let mut grid = Vec::with_capacity(n_rows * dims);
    let mut counters = vec![0usize; dims];
    for _ in 0..n_rows {
        for (axis, &c) in axes.iter().zip(&counters) {
            grid.push(axis[c]);
        }
        // Odometer increment, last dimension fastest
        for d in (0..dims).rev() {
            counters[d] += 1;
            if counters[d] < n_samples_per_dim[d] {
                break;
            }
            counters[d] = 0;
        }
    }
    grid
}
