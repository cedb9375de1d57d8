//! High-level API for the RLS function approximator.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for configuring the kernels and meta parameters of a
//! [`FunctionApproximatorRls`].
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters
//!   except the kernels.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Type-Safe**: Generic over `Float` types and kernel implementations.
//!
//! ### Configuration Flow
//!
//! 1. Create an [`RlsBuilder`] via `Rls::new()`.
//! 2. Chain configuration methods (`.kernels()`, `.regularization()`, etc.).
//! 3. Call `.build()` to get an untrained approximator.

// Internal dependencies
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::lines::LocalLines;
pub use crate::approximator::FunctionApproximatorRls;
pub use crate::engine::grid_export::GridData;
pub use crate::engine::meta::MetaParameters;
pub use crate::math::kernel::{GaussianKernels, KernelActivations};
pub use crate::math::linalg::FloatLinalg;
pub use crate::primitives::errors::RlsError;

/// Fluent builder for configuring an RLS function approximator.
#[derive(Debug, Clone)]
pub struct RlsBuilder<T, K = GaussianKernels<T>> {
    /// Kernels the local lines are attached to. Required.
    pub kernels: Option<K>,

    /// Ridge term on the diagonal of `X'WX` (default: 0).
    pub regularization: Option<T>,

    /// Fit an offset per kernel (default: true).
    pub use_offset: Option<bool>,

    /// Pruning threshold on activations (default: 0, no pruning).
    pub epsilon: Option<T>,

    /// Error raised while configuring, reported by `build`.
    #[doc(hidden)]
    pub deferred_error: Option<RlsError>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: FloatLinalg, K: KernelActivations<T> + Clone> Default for RlsBuilder<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatLinalg, K: KernelActivations<T> + Clone> RlsBuilder<T, K> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            kernels: None,
            regularization: None,
            use_offset: None,
            epsilon: None,
            deferred_error: None,
            duplicate_param: None,
        }
    }

    /// Set the kernels.
    pub fn kernels(mut self, kernels: K) -> Self {
        if self.kernels.is_some() {
            self.duplicate_param = Some("kernels");
        }
        self.kernels = Some(kernels);
        self
    }

    /// Set the ridge regularization strength.
    pub fn regularization(mut self, regularization: T) -> Self {
        if self.regularization.is_some() {
            self.duplicate_param = Some("regularization");
        }
        self.regularization = Some(regularization);
        self
    }

    /// Enable or disable the per-kernel offset.
    pub fn use_offset(mut self, use_offset: bool) -> Self {
        if self.use_offset.is_some() {
            self.duplicate_param = Some("use_offset");
        }
        self.use_offset = Some(use_offset);
        self
    }

    /// Set the activation threshold below which samples are pruned.
    pub fn epsilon(mut self, epsilon: T) -> Self {
        if self.epsilon.is_some() {
            self.duplicate_param = Some("epsilon");
        }
        self.epsilon = Some(epsilon);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build an untrained approximator.
    pub fn build(self) -> Result<FunctionApproximatorRls<T, K>, RlsError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let kernels = self.kernels.ok_or(RlsError::MissingParameter {
            parameter: "kernels",
        })?;

        let defaults = MetaParameters::<T>::default();
        let meta = MetaParameters {
            regularization: self.regularization.unwrap_or(defaults.regularization),
            use_offset: self.use_offset.unwrap_or(defaults.use_offset),
            epsilon: self.epsilon.unwrap_or(defaults.epsilon),
        };

        FunctionApproximatorRls::new(kernels, meta)
    }
}

impl<T: FloatLinalg> RlsBuilder<T, GaussianKernels<T>> {
    /// Place Gaussian kernels on a regular grid over `[min, max]`.
    ///
    /// See [`GaussianKernels::from_grid`]. Errors are reported by `build`.
    pub fn kernel_grid(
        mut self,
        min: &[T],
        max: &[T],
        n_per_dim: &[usize],
        intersection_height: T,
    ) -> Self {
        match GaussianKernels::from_grid(min, max, n_per_dim, intersection_height) {
            Ok(kernels) => self.kernels(kernels),
            Err(err) => {
                if self.kernels.is_some() {
                    self.duplicate_param = Some("kernels");
                }
                self.deferred_error.get_or_insert(err);
                self
            }
        }
    }
}
