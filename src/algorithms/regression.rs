//! Per-kernel weighted least squares.
//!
//! ## Purpose
//!
//! This module solves one weighted linear regression per kernel:
//! `beta_k = (X'W_kX + lambda I)^-1 X'W_k y`, where `W_k` is the diagonal matrix
//! of kernel `k`'s activations over the training samples.
//!
//! ## Design notes
//!
//! * **Dense path** (`epsilon == 0`): every sample contributes.
//! * **Pruned path** (`epsilon > 0`): samples with activation below `epsilon`
//!   are dropped first. The kept indices are selected, then the reduced design
//!   rows, weights and targets are materialized before solving.
//! * **Accumulation**: `X'WX` is accumulated row by row as `sum_i w_i x_i x_i'`,
//!   which equals the product with the `N x N` diagonal matrix without forming it.
//! * **Failure**: Rank-deficient systems and empty pruned subsets are errors,
//!   never NaN coefficients.
//!
//! ## Invariants
//!
//! * The pruned subset preserves relative row order and contains exactly the
//!   indices with `w_i >= epsilon`.
//! * With no sample pruned, both paths produce identical coefficients.
//!
//! ## Non-goals
//!
//! * Incremental (recursive) updates. Every call solves from scratch.

// External dependencies
use log::trace;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::design::DesignMatrix;
use crate::math::linalg::FloatLinalg;
use crate::primitives::buffer::FittingBuffer;
use crate::primitives::errors::RlsError;

// ============================================================================
// Row Selection
// ============================================================================

/// Collect, in order, the indices of samples whose weight is at least `epsilon`.
pub fn select_rows<T: Float>(weights: &[T], epsilon: T, rows: &mut Vec<usize>) {
    rows.clear();
    rows.extend(
        weights
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w >= epsilon)
            .map(|(i, _)| i),
    );
}

// ============================================================================
// Normal Equations
// ============================================================================

/// Accumulate `X'WX` and `X'Wy` over row-major `design` with `n_betas` columns.
///
/// Overwrites `xtw_x` (`n_betas^2`) and `xtw_y` (`n_betas`).
pub fn accumulate_normal_equations<T: Float>(
    design: &[T],
    targets: &[T],
    weights: &[T],
    n_betas: usize,
    xtw_x: &mut [T],
    xtw_y: &mut [T],
) {
    debug_assert_eq!(design.len(), targets.len() * n_betas);
    debug_assert_eq!(weights.len(), targets.len());

    xtw_x.fill(T::zero());
    xtw_y.fill(T::zero());

    for ((row, &y), &w) in design.chunks_exact(n_betas).zip(targets).zip(weights) {
        for j in 0..n_betas {
            let w_xj = w * row[j];
            for k in j..n_betas {
                xtw_x[j * n_betas + k] = xtw_x[j * n_betas + k] + w_xj * row[k];
            }
            xtw_y[j] = xtw_y[j] + w_xj * y;
        }
    }

    // Fill symmetric part
    for j in 0..n_betas {
        for k in 0..j {
            xtw_x[j * n_betas + k] = xtw_x[k * n_betas + j];
        }
    }
}

// ============================================================================
// Solver
// ============================================================================

/// Reusable per-kernel weighted least-squares solver.
#[derive(Debug, Clone)]
pub struct WeightedLeastSquares<T> {
    n_betas: usize,
    regularization: T,
    epsilon: T,
    buffer: FittingBuffer<T>,
}

impl<T: FloatLinalg> WeightedLeastSquares<T> {
    /// Create a solver for `n_samples` samples and `n_betas` coefficients.
    pub fn new(n_samples: usize, n_betas: usize, regularization: T, epsilon: T) -> Self {
        let mut buffer = FittingBuffer::new(n_samples, n_betas);
        buffer.xtw_x.resize(n_betas * n_betas, T::zero());
        buffer.xtw_y.resize(n_betas, T::zero());
        Self {
            n_betas,
            regularization,
            epsilon,
            buffer,
        }
    }

    /// Whether the pruned path is active.
    #[inline]
    pub fn prunes(&self) -> bool {
        self.epsilon > T::zero()
    }

    /// Fit `kernel` using column `kernel` of the row-major `n_samples x n_kernels`
    /// activation matrix as weights.
    pub fn fit_column(
        &mut self,
        kernel: usize,
        design: &DesignMatrix<T>,
        targets: &[T],
        activations: &[T],
        n_kernels: usize,
    ) -> Result<Vec<T>, RlsError> {
        let mut weights = core::mem::take(&mut self.buffer.weights);
        weights.clear();
        weights.extend(activations.iter().skip(kernel).step_by(n_kernels).copied());
        let result = self.fit_kernel(kernel, design, targets, &weights);
        self.buffer.weights = weights;
        result
    }

    /// Fit the coefficients of `kernel` from its activation column `weights`.
    pub fn fit_kernel(
        &mut self,
        kernel: usize,
        design: &DesignMatrix<T>,
        targets: &[T],
        weights: &[T],
    ) -> Result<Vec<T>, RlsError> {
        debug_assert_eq!(design.n_betas(), self.n_betas);
        debug_assert_eq!(design.n_rows(), targets.len());
        debug_assert_eq!(weights.len(), targets.len());

        let n_betas = self.n_betas;
        let prunes = self.prunes();
        let epsilon = self.epsilon;
        let regularization = self.regularization;
        let FittingBuffer {
            xtw_x,
            xtw_y,
            rows,
            sub_design,
            sub_weights,
            sub_targets,
            ..
        } = &mut self.buffer;

        if !prunes {
            accumulate_normal_equations(
                design.as_slice(),
                targets,
                weights,
                n_betas,
                xtw_x,
                xtw_y,
            );
        } else {
            select_rows(weights, epsilon, rows);
            trace!(
                "kernel {}: kept {} of {} samples",
                kernel,
                rows.len(),
                targets.len()
            );
            if rows.is_empty() {
                return Err(RlsError::DegenerateKernel {
                    kernel,
                    epsilon: epsilon.to_f64().unwrap_or(f64::NAN),
                });
            }

            sub_design.clear();
            sub_weights.clear();
            sub_targets.clear();
            for &i in rows.iter() {
                sub_design.extend_from_slice(design.row(i));
                sub_weights.push(weights[i]);
                sub_targets.push(targets[i]);
            }

            accumulate_normal_equations(
                sub_design,
                sub_targets,
                sub_weights,
                n_betas,
                xtw_x,
                xtw_y,
            );
        }

        if regularization > T::zero() {
            for j in 0..n_betas {
                xtw_x[j * n_betas + j] = xtw_x[j * n_betas + j] + regularization;
            }
        }

        match T::solve_normal(xtw_x, xtw_y, n_betas) {
            Some(beta) if beta.iter().all(|b| b.is_finite()) => Ok(beta),
            _ => Err(RlsError::SingularSystem { kernel }),
        }
    }
}
