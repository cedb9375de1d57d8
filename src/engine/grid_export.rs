//! Diagnostic evaluation of a trained model over a regular grid.
//!
//! ## Purpose
//!
//! This module evaluates every intermediate quantity of a trained model (line
//! values, raw and normalized activations, blended predictions) on a regular
//! grid of inputs, and writes them as matrix files for offline inspection.
//!
//! ## Key concepts
//!
//! * **Files**: `n_samples_per_dim.txt` (one count per line),
//!   `inputs_grid.txt` (`G x D`), `lines_grid.txt`,
//!   `activations_unnormalized_grid.txt` and `activations_grid.txt`
//!   (`G x K` each), `predictions_grid.txt` (`G x 1`), where `G` is the
//!   number of grid points.
//!
//! ## Invariants
//!
//! * With `overwrite == false`, an existing file aborts the export before
//!   anything is written.
//! * The model is only read.

// External dependencies
use std::fmt::Display;
use std::path::Path;

use log::debug;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::lines::LocalLines;
use crate::engine::predictor::blend_into;
use crate::io::matrix::save_matrix;
use crate::math::grid;
use crate::math::kernel::KernelActivations;
use crate::primitives::errors::RlsError;

/// File names written by [`GridData::save`], in write order.
pub const GRID_FILES: [&str; 6] = [
    "n_samples_per_dim.txt",
    "inputs_grid.txt",
    "lines_grid.txt",
    "activations_unnormalized_grid.txt",
    "activations_grid.txt",
    "predictions_grid.txt",
];

/// Model quantities evaluated at every grid point. All matrices are row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct GridData<T> {
    /// Samples per input dimension.
    pub n_samples_per_dim: Vec<usize>,
    /// Grid inputs, `n_points x input_dim`.
    pub inputs: Vec<T>,
    /// Line values, `n_points x n_kernels`.
    pub lines: Vec<T>,
    /// Raw activations, `n_points x n_kernels`.
    pub activations_unnormalized: Vec<T>,
    /// Normalized activations, `n_points x n_kernels`.
    pub activations: Vec<T>,
    /// Blended predictions, one per grid point.
    pub predictions: Vec<T>,
    /// Input dimensionality.
    pub input_dim: usize,
    /// Number of kernels.
    pub n_kernels: usize,
}

impl<T: Float> GridData<T> {
    /// Evaluate `model` on the grid spanning `[min, max]`.
    ///
    /// The grid arguments must already be validated.
    pub fn evaluate<K: KernelActivations<T>>(
        model: &LocalLines<T, K>,
        min: &[T],
        max: &[T],
        n_samples_per_dim: &[usize],
    ) -> Self {
        let input_dim = model.input_dim();
        let n_kernels = model.n_basis_functions();

        let inputs = grid::inputs_grid(min, max, n_samples_per_dim);
        let n_points = inputs.len() / input_dim;

        let mut lines = vec![T::zero(); n_points * n_kernels];
        let mut activations_unnormalized = vec![T::zero(); n_points * n_kernels];
        let mut activations = vec![T::zero(); n_points * n_kernels];
        let mut predictions = vec![T::zero(); n_points];

        model.lines_into(&inputs, &mut lines);
        model.unnormalized_kernel_activations_into(&inputs, &mut activations_unnormalized);
        model.kernel_activations_into(&inputs, &mut activations);
        blend_into(&lines, &activations, n_kernels, &mut predictions);

        Self {
            n_samples_per_dim: n_samples_per_dim.to_vec(),
            inputs,
            lines,
            activations_unnormalized,
            activations,
            predictions,
            input_dim,
            n_kernels,
        }
    }

    /// Number of grid points.
    pub fn n_points(&self) -> usize {
        self.predictions.len()
    }
}

impl<T: Float + Display> GridData<T> {
    /// Write all grid files into `directory`.
    pub fn save(&self, directory: &Path, overwrite: bool) -> Result<(), RlsError> {
        if !overwrite {
            if let Some(existing) = GRID_FILES
                .iter()
                .map(|name| directory.join(name))
                .find(|path| path.exists())
            {
                return Err(RlsError::FileExists {
                    path: existing.display().to_string(),
                });
            }
        }

        let [counts, inputs, lines, raw, normalized, predictions] = GRID_FILES;
        save_matrix(directory, counts, &self.n_samples_per_dim, 1, overwrite)?;
        save_matrix(directory, inputs, &self.inputs, self.input_dim, overwrite)?;
        save_matrix(directory, lines, &self.lines, self.n_kernels, overwrite)?;
        save_matrix(
            directory,
            raw,
            &self.activations_unnormalized,
            self.n_kernels,
            overwrite,
        )?;
        save_matrix(directory, normalized, &self.activations, self.n_kernels, overwrite)?;
        save_matrix(directory, predictions, &self.predictions, 1, overwrite)?;

        debug!(
            "wrote grid data for {} points to {}",
            self.n_points(),
            directory.display()
        );
        Ok(())
    }
}
