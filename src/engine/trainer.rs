//! Training of the local line model.
//!
//! ## Purpose
//!
//! This module turns a sample set into a [`LocalLines`]: it builds the design
//! matrix, evaluates the normalized kernel activations once, runs one weighted
//! least-squares solve per kernel and splits every coefficient row into slopes
//! and an offset.
//!
//! ## Design notes
//!
//! * **All or nothing**: The first failing kernel aborts training and its error
//!   is returned. No partial model is produced.
//! * **Fresh state**: Nothing is carried over between calls; the design matrix
//!   and activations are rebuilt every time.
//!
//! ## Invariants
//!
//! * Slopes are the first `input_dim` coefficients of each row. With an offset
//!   column the last coefficient is the offset, otherwise the offset is zero.

// External dependencies
use log::debug;

// Internal dependencies
use crate::algorithms::design::DesignMatrix;
use crate::algorithms::lines::LocalLines;
use crate::algorithms::regression::WeightedLeastSquares;
use crate::engine::meta::MetaParameters;
use crate::math::kernel::KernelActivations;
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::RlsError;

/// Fit one local line per kernel.
///
/// `inputs` is row-major with `kernels.input_dim()` columns and one row per
/// target. Shapes are checked by the caller.
pub fn fit_local_lines<T, K>(
    kernels: &K,
    meta: &MetaParameters<T>,
    inputs: &[T],
    targets: &[T],
) -> Result<LocalLines<T, K>, RlsError>
where
    T: FloatLinalg,
    K: KernelActivations<T> + Clone,
{
    let input_dim = kernels.input_dim();
    let n_kernels = kernels.n_kernels();
    let n_samples = targets.len();

    let design = DesignMatrix::build(inputs, input_dim, meta.use_offset);
    let n_betas = design.n_betas();

    let mut activations = vec![T::zero(); n_samples * n_kernels];
    kernels.activations_into(inputs, &mut activations);

    debug!(
        "training {} kernels on {} samples ({} coefficients each, pruning {})",
        n_kernels,
        n_samples,
        n_betas,
        if meta.epsilon > T::zero() { "on" } else { "off" }
    );

    let mut solver =
        WeightedLeastSquares::new(n_samples, n_betas, meta.regularization, meta.epsilon);
    let mut slopes = Vec::with_capacity(n_kernels * input_dim);
    let mut offsets = Vec::with_capacity(n_kernels);

    for k in 0..n_kernels {
        let beta = solver.fit_column(k, &design, targets, &activations, n_kernels)?;
        slopes.extend_from_slice(&beta[..input_dim]);
        offsets.push(if meta.use_offset {
            beta[input_dim]
        } else {
            T::zero()
        });
    }

    debug!("training finished for {} kernels", n_kernels);
    Ok(LocalLines::new(kernels.clone(), slopes, offsets))
}
