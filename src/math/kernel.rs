//! Kernel activation functions.
//!
//! ## Purpose
//!
//! This module defines the kernel activation interface consumed by the trainer
//! and the predictor, and a Gaussian implementation of it. Activations are
//! both regression weights (training) and blending weights (prediction).
//!
//! ## Design notes
//!
//! * **Buffer-out**: Every evaluation writes into a caller-provided slice so
//!   the single-sample prediction path can reuse fixed scratch space.
//! * **Normalization**: Normalized activations divide each row by its sum. A
//!   row whose raw activations are all zero gets the uniform weight `1/K`.
//!
//! ## Key concepts
//!
//! * **Unnormalized activation**: `exp(-0.5 * sum_d ((x_d - c_d) / w_d)^2)`.
//! * **Intersection height**: For grid-placed kernels, the value at which two
//!   neighboring kernels cross. It determines the widths.
//!
//! ## Invariants
//!
//! * Output slices are `n_samples x n_kernels`, row-major.
//! * Normalized rows sum to one.

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::grid;
use crate::primitives::errors::RlsError;

// ============================================================================
// Kernel Activation Interface
// ============================================================================

/// Source of per-kernel activation weights.
pub trait KernelActivations<T: Float> {
    /// Number of kernels `K`.
    fn n_kernels(&self) -> usize;

    /// Input dimensionality the kernels are defined over.
    fn input_dim(&self) -> usize;

    /// Write raw activations for `inputs` (row-major, `input_dim` columns).
    ///
    /// `out` must hold `n_samples * n_kernels` values.
    fn unnormalized_activations_into(&self, inputs: &[T], out: &mut [T]);

    /// Write activations normalized to sum to one across kernels.
    fn activations_into(&self, inputs: &[T], out: &mut [T]) {
        self.unnormalized_activations_into(inputs, out);
        normalize_rows(out, self.n_kernels());
    }
}

/// Normalize each `n_kernels`-wide row of `activations` in place.
pub fn normalize_rows<T: Float>(activations: &mut [T], n_kernels: usize) {
    if n_kernels == 0 {
        return;
    }
    let uniform = T::one() / T::from(n_kernels).unwrap_or_else(T::one);
    for row in activations.chunks_exact_mut(n_kernels) {
        let sum = row.iter().fold(T::zero(), |acc, &a| acc + a);
        if sum > T::zero() {
            for a in row.iter_mut() {
                *a = *a / sum;
            }
        } else {
            row.fill(uniform);
        }
    }
}

// ============================================================================
// Gaussian Kernels
// ============================================================================

/// Axis-aligned Gaussian kernels with per-dimension widths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianKernels<T> {
    /// Kernel centers, `n_kernels x input_dim`, row-major.
    centers: Vec<T>,
    /// Kernel widths (standard deviations), same layout as `centers`.
    widths: Vec<T>,
    /// Input dimensionality.
    input_dim: usize,
}

impl<T: Float> GaussianKernels<T> {
    /// Create kernels from explicit centers and widths.
    pub fn new(centers: Vec<T>, widths: Vec<T>, input_dim: usize) -> Result<Self, RlsError> {
        if input_dim == 0 {
            return Err(RlsError::InvalidKernels(
                "input dimension must be at least 1".to_string(),
            ));
        }
        if centers.is_empty() || centers.len() % input_dim != 0 {
            return Err(RlsError::InvalidKernels(format!(
                "{} center values do not form rows of width {}",
                centers.len(),
                input_dim
            )));
        }
        if widths.len() != centers.len() {
            return Err(RlsError::InvalidKernels(format!(
                "{} widths for {} center values",
                widths.len(),
                centers.len()
            )));
        }
        if let Some(c) = centers.iter().find(|c| !c.is_finite()) {
            return Err(RlsError::InvalidKernels(format!(
                "center {} is not finite",
                c.to_f64().unwrap_or(f64::NAN)
            )));
        }
        if let Some(w) = widths.iter().find(|w| !w.is_finite() || **w <= T::zero()) {
            return Err(RlsError::InvalidKernels(format!(
                "width {} must be positive and finite",
                w.to_f64().unwrap_or(f64::NAN)
            )));
        }

        Ok(Self {
            centers,
            widths,
            input_dim,
        })
    }

    /// Place kernels on a regular grid over `[min, max]`.
    ///
    /// Widths are chosen so neighboring kernels intersect at
    /// `intersection_height`, which must lie in `(0, 1)`. Along an axis with a
    /// single kernel the width is the axis span (or one if the span is zero).
    pub fn from_grid(
        min: &[T],
        max: &[T],
        n_per_dim: &[usize],
        intersection_height: T,
    ) -> Result<Self, RlsError> {
        grid::check_grid(min, max, n_per_dim).map_err(|e| match e {
            RlsError::InvalidGrid(msg) => RlsError::InvalidKernels(msg),
            other => other,
        })?;
        if !(intersection_height > T::zero() && intersection_height < T::one()) {
            return Err(RlsError::InvalidKernels(format!(
                "intersection height {} must be in (0, 1)",
                intersection_height.to_f64().unwrap_or(f64::NAN)
            )));
        }

        let input_dim = min.len();
        let two = T::one() + T::one();
        // exp(-0.5 (d/2)^2 / w^2) = h  =>  w = d / (2 sqrt(-2 ln h))
        let denominator = two * (-two * intersection_height.ln()).sqrt();

        let axis_widths: Vec<T> = (0..input_dim)
            .map(|d| {
                let span = max[d] - min[d];
                if n_per_dim[d] > 1 {
                    let spacing = span / T::from(n_per_dim[d] - 1).unwrap_or_else(T::one);
                    spacing.abs() / denominator
                } else if span.abs() > T::zero() {
                    span.abs()
                } else {
                    T::one()
                }
            })
            .collect();

        let centers = grid::inputs_grid(min, max, n_per_dim);
        let n_kernels = centers.len() / input_dim;
        let widths: Vec<T> = (0..n_kernels).flat_map(|_| axis_widths.iter().copied()).collect();

        Self::new(centers, widths, input_dim)
    }

    /// Kernel centers, `n_kernels x input_dim`.
    pub fn centers(&self) -> &[T] {
        &self.centers
    }

    /// Kernel widths, `n_kernels x input_dim`.
    pub fn widths(&self) -> &[T] {
        &self.widths
    }
}

impl<T: Float> KernelActivations<T> for GaussianKernels<T> {
    #[inline]
    fn n_kernels(&self) -> usize {
        self.centers.len() / self.input_dim
    }

    #[inline]
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn unnormalized_activations_into(&self, inputs: &[T], out: &mut [T]) {
        let dims = self.input_dim;
        let n_kernels = self.n_kernels();
        debug_assert_eq!(inputs.len() % dims, 0);
        debug_assert_eq!(out.len(), inputs.len() / dims * n_kernels);

        let half = T::one() / (T::one() + T::one());
        for (x, row) in inputs.chunks_exact(dims).zip(out.chunks_exact_mut(n_kernels)) {
            let kernels = self
                .centers
                .chunks_exact(dims)
                .zip(self.widths.chunks_exact(dims));
            for (a, (center, width)) in row.iter_mut().zip(kernels) {
                let mut exponent = T::zero();
                for d in 0..dims {
                    let z = (x[d] - center[d]) / width[d];
                    exponent = exponent + z * z;
                }
                *a = (-half * exponent).exp();
            }
        }
    }
}
