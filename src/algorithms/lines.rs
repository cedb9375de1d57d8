//! Fitted local line model.
//!
//! ## Purpose
//!
//! This module holds the result of training: one affine model
//! `slope_k . x + offset_k` per kernel, together with the kernels that weight
//! them. It evaluates the line values and forwards activation queries to the
//! kernels so the predictor only talks to one object.
//!
//! ## Invariants
//!
//! * `slopes` is `n_kernels x input_dim`, row-major.
//! * `offsets` has one entry per kernel. Without an offset column every entry
//!   is zero.
//! * Immutable once constructed.

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::kernel::KernelActivations;

/// Per-kernel affine models plus the kernels that blend them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalLines<T, K> {
    kernels: K,
    slopes: Vec<T>,
    offsets: Vec<T>,
}

impl<T: Float, K: KernelActivations<T>> LocalLines<T, K> {
    /// Assemble a line model.
    ///
    /// # Panics
    ///
    /// Panics if the slope or offset counts do not match the kernels.
    pub fn new(kernels: K, slopes: Vec<T>, offsets: Vec<T>) -> Self {
        let n_kernels = kernels.n_kernels();
        assert_eq!(
            slopes.len(),
            n_kernels * kernels.input_dim(),
            "slopes must be n_kernels x input_dim"
        );
        assert_eq!(offsets.len(), n_kernels, "one offset per kernel");
        Self {
            kernels,
            slopes,
            offsets,
        }
    }

    /// Whether slopes and offsets match the kernels. Always true for models
    /// built with [`new`](Self::new); deserialized models are checked with it.
    pub fn is_consistent(&self) -> bool {
        let n_kernels = self.kernels.n_kernels();
        self.slopes.len() == n_kernels * self.kernels.input_dim() && self.offsets.len() == n_kernels
    }

    /// Number of kernels (local lines).
    #[inline]
    pub fn n_basis_functions(&self) -> usize {
        self.offsets.len()
    }

    /// Input dimensionality.
    #[inline]
    pub fn input_dim(&self) -> usize {
        self.kernels.input_dim()
    }

    /// All slopes, `n_kernels x input_dim`.
    pub fn slopes(&self) -> &[T] {
        &self.slopes
    }

    /// All offsets.
    pub fn offsets(&self) -> &[T] {
        &self.offsets
    }

    /// Slope vector of kernel `k`.
    pub fn slope(&self, k: usize) -> &[T] {
        let dims = self.input_dim();
        &self.slopes[k * dims..(k + 1) * dims]
    }

    /// Offset of kernel `k`.
    pub fn offset(&self, k: usize) -> T {
        self.offsets[k]
    }

    /// Kernels the lines are blended with.
    pub fn kernels(&self) -> &K {
        &self.kernels
    }

    /// Write the value of every line at every input row into `out`
    /// (`n_samples x n_kernels`).
    pub fn lines_into(&self, inputs: &[T], out: &mut [T]) {
        let dims = self.input_dim();
        let n_kernels = self.n_basis_functions();
        debug_assert_eq!(out.len(), inputs.len() / dims * n_kernels);

        for (x, row) in inputs.chunks_exact(dims).zip(out.chunks_exact_mut(n_kernels)) {
            let lines = self.slopes.chunks_exact(dims).zip(&self.offsets);
            for (value, (slope, &offset)) in row.iter_mut().zip(lines) {
                *value = slope
                    .iter()
                    .zip(x)
                    .fold(offset, |acc, (&s, &xi)| acc + s * xi);
            }
        }
    }

    /// Normalized kernel activations, `n_samples x n_kernels`.
    #[inline]
    pub fn kernel_activations_into(&self, inputs: &[T], out: &mut [T]) {
        self.kernels.activations_into(inputs, out);
    }

    /// Raw kernel activations, `n_samples x n_kernels`.
    #[inline]
    pub fn unnormalized_kernel_activations_into(&self, inputs: &[T], out: &mut [T]) {
        self.kernels.unnormalized_activations_into(inputs, out);
    }
}
