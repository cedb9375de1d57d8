//! Design matrix construction.
//!
//! ## Purpose
//!
//! This module builds the regressor matrix used by every per-kernel solve:
//! the raw inputs, optionally extended with a constant column of ones so an
//! offset term can be fitted.
//!
//! ## Invariants
//!
//! * `n_betas == input_dim + 1` with an offset column, `input_dim` without.
//! * The offset column, when present, is the last column.
//! * Rebuilt on every training call; never persisted.

// External dependencies
use num_traits::Float;

/// Row-major design matrix `X`.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix<T> {
    data: Vec<T>,
    n_rows: usize,
    n_betas: usize,
}

impl<T: Float> DesignMatrix<T> {
    /// Build `X` from row-major `inputs` with `input_dim` columns.
    pub fn build(inputs: &[T], input_dim: usize, use_offset: bool) -> Self {
        debug_assert!(input_dim > 0);
        debug_assert_eq!(inputs.len() % input_dim, 0);

        let n_rows = inputs.len() / input_dim;
        if !use_offset {
            return Self {
                data: inputs.to_vec(),
                n_rows,
                n_betas: input_dim,
            };
        }

        let n_betas = input_dim + 1;
        let mut data = Vec::with_capacity(n_rows * n_betas);
        for row in inputs.chunks_exact(input_dim) {
            data.extend_from_slice(row);
            data.push(T::one());
        }
        Self {
            data,
            n_rows,
            n_betas,
        }
    }

    /// Number of samples.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of regression coefficients per kernel.
    #[inline]
    pub fn n_betas(&self) -> usize {
        self.n_betas
    }

    /// Row `i` of the design matrix.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.n_betas..(i + 1) * self.n_betas]
    }

    /// The whole matrix, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}
