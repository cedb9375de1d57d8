//! Input validation for RLS configuration and data.
//!
//! ## Purpose
//!
//! This module validates meta parameters, kernel geometry and grid requests
//! before they reach the trainer or the grid exporter, and asserts the shape
//! preconditions of training and prediction.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Two classes**: Configuration problems are `RlsError`s. Shape mismatches
//!   between inputs and targets are caller bugs and panic.
//!
//! ## Invariants
//!
//! * All validated parameters satisfy their mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not correct or transform invalid inputs.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::grid;
use crate::math::kernel::KernelActivations;
use crate::primitives::errors::RlsError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for RLS configuration and input data.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the ridge regularization strength.
    pub fn validate_regularization<T: Float>(regularization: T) -> Result<(), RlsError> {
        if !regularization.is_finite() || regularization < T::zero() {
            return Err(RlsError::InvalidRegularization(
                regularization.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the pruning threshold.
    pub fn validate_epsilon<T: Float>(epsilon: T) -> Result<(), RlsError> {
        if !epsilon.is_finite() || epsilon < T::zero() {
            return Err(RlsError::InvalidEpsilon(
                epsilon.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate that the kernels describe at least one kernel over a non-empty
    /// input space.
    pub fn validate_kernels<T: Float, K: KernelActivations<T>>(kernels: &K) -> Result<(), RlsError> {
        if kernels.input_dim() == 0 {
            return Err(RlsError::InvalidKernels(
                "input dimension must be at least 1".to_string(),
            ));
        }
        if kernels.n_kernels() == 0 {
            return Err(RlsError::InvalidKernels(
                "at least one kernel is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate a grid request against the approximator's input dimension.
    pub fn validate_grid<T: Float>(
        min: &[T],
        max: &[T],
        n_samples_per_dim: &[usize],
        input_dim: usize,
    ) -> Result<(), RlsError> {
        grid::check_grid(min, max, n_samples_per_dim)?;
        if min.len() != input_dim {
            return Err(RlsError::InvalidGrid(format!(
                "grid has {} dimensions, approximator expects {}",
                min.len(),
                input_dim
            )));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), RlsError> {
        if let Some(param) = duplicate_param {
            return Err(RlsError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }

    // ========================================================================
    // Shape Preconditions
    // ========================================================================

    /// Assert that `inputs` holds exactly one `input_dim`-wide row per target.
    ///
    /// # Panics
    ///
    /// Panics on any mismatch.
    #[inline]
    pub fn assert_training_shapes<T>(inputs: &[T], targets: &[T], input_dim: usize) {
        assert_eq!(
            inputs.len(),
            targets.len() * input_dim,
            "inputs must have {} columns and one row per target ({} targets)",
            input_dim,
            targets.len()
        );
    }

    /// Assert that `inputs` is a whole number of rows and `outputs` has one
    /// entry per row. Returns the row count.
    ///
    /// # Panics
    ///
    /// Panics on any mismatch.
    #[inline]
    pub fn assert_prediction_shapes<T>(inputs: &[T], outputs: &[T], input_dim: usize) -> usize {
        assert_eq!(
            inputs.len() % input_dim,
            0,
            "inputs must have {} columns",
            input_dim
        );
        let rows = inputs.len() / input_dim;
        assert_eq!(outputs.len(), rows, "outputs must have one entry per input row");
        rows
    }
}
