//! # RLS — Locally Weighted Least-Squares Function Approximation for Rust
//!
//! A kernel-blended function approximator: one linear model ("line") is fitted
//! per basis-function kernel by weighted least squares, and predictions blend
//! the lines with the kernel activations.
//!
//! ## What is RLS?
//!
//! The input space is covered by `K` kernels. Each kernel `k` owns a local
//! affine model `slope_k . x + offset_k`, fitted with every training sample
//! weighted by that kernel's normalized activation at the sample. A prediction
//! is the activation-weighted sum of the local models:
//!
//! ```text
//! y(x) = sum_k  a_k(x) * (slope_k . x + offset_k),     sum_k a_k(x) = 1
//! ```
//!
//! **Key properties:**
//! - Smooth, locally linear approximations of nonlinear functions
//! - Training is a closed-form solve per kernel, no iterations
//! - Single-sample prediction performs no heap allocation, so it can run
//!   inside a control loop
//! - Generic over `f32`/`f64` and over the kernel implementation
//!
//! **Common applications:**
//! - Learning the forcing term of dynamical movement primitives
//! - Smooth regression of sampled trajectories
//! - Fast surrogate models for real-time evaluation
//!
//! ## Quick Start
//!
//! ```rust
//! use rls_rs::prelude::*;
//!
//! // One kernel covering the whole input range
//! let kernels = GaussianKernels::new(vec![0.0_f64], vec![1.0], 1)?;
//!
//! let mut model = Rls::new().kernels(kernels).build()?;
//! model.train(&[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 4.0, 6.0])?;
//!
//! let lines = model.local_lines().unwrap();
//! assert!((lines.slope(0)[0] - 2.0).abs() < 1e-9);
//! assert!(lines.offset(0).abs() < 1e-9);
//!
//! let prediction = model.predict(&[5.0]).unwrap();
//! assert!((prediction[0] - 10.0).abs() < 1e-9);
//! # Result::<(), RlsError>::Ok(())
//! ```
//!
//! ### Grid-placed kernels
//!
//! ```rust
//! use rls_rs::prelude::*;
//!
//! let inputs: Vec<f64> = (0..100).map(|i| i as f64 / 99.0).collect();
//! let targets: Vec<f64> = inputs
//!     .iter()
//!     .map(|x| (2.0 * std::f64::consts::PI * x).sin())
//!     .collect();
//!
//! let mut model = Rls::new()
//!     .kernel_grid(&[0.0], &[1.0], &[11], 0.5) // 11 kernels, neighbors cross at 0.5
//!     .epsilon(1e-4)                          // prune negligible activations
//!     .build()?;
//! model.train(&inputs, &targets)?;
//!
//! // Allocation-free single-sample prediction
//! let mut y = [0.0];
//! assert!(model.predict_into(&[0.25], &mut y));
//! assert!((y[0] - 1.0).abs() < 0.1);
//! # Result::<(), RlsError>::Ok(())
//! ```
//!
//! ## Parameters
//!
//! | Parameter          | Default | Range      | Description                                        |
//! |--------------------|---------|------------|----------------------------------------------------|
//! | **kernels**        | —       | K ≥ 1      | Kernels the local lines are attached to (required) |
//! | **regularization** | 0       | [0, ∞)     | Ridge term added to the diagonal of `X'WX`         |
//! | **use_offset**     | true    | bool       | Fit an offset per kernel                           |
//! | **epsilon**        | 0       | [0, ∞)     | Samples with activation below this are pruned      |
//!
//! ## Behavior
//!
//! * **Training** fits from scratch. Calling `train` on a trained approximator
//!   logs a warning and keeps the existing model; use `retrain` to re-fit.
//! * **Prediction** before training logs a warning and produces nothing.
//! * **Numerical failure** of any kernel aborts training with
//!   [`RlsError::SingularSystem`](prelude::RlsError::SingularSystem) or
//!   [`RlsError::DegenerateKernel`](prelude::RlsError::DegenerateKernel).
//!   Coefficients are never NaN.
//! * **Shape mismatches** between inputs and targets are programming errors
//!   and panic.
//!
//! ## Diagnostics
//!
//! `save_grid_data` evaluates the trained model on a regular grid and writes
//! the inputs, line values, raw and normalized activations and predictions as
//! whitespace-separated matrix files. An empty directory path skips the export.
//!
//! ## Persistence
//!
//! The approximator (meta parameters, kernels and fitted lines) serializes to
//! JSON with `to_json`/`from_json` and `save`/`load`.
//!
//! ## Logging
//!
//! Warnings and training summaries go through the [`log`] facade. The crate
//! installs no logger.

#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - error type and scratch buffers.
mod primitives;

// Layer 2: Math - linear algebra backend, kernels and grids.
mod math;

// Layer 3: Algorithms - design matrix, weighted least squares and the
// fitted line model.
mod algorithms;

// Layer 4: Engine - validation, training, prediction and grid export.
mod engine;

// Plain-text matrix persistence.
mod io;

// The function approximator tying the layers together.
mod approximator;

// High-level fluent API.
//
// Provides the `Rls` builder for configuring the approximator.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard RLS prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use rls_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        FloatLinalg, FunctionApproximatorRls, GaussianKernels, GridData, KernelActivations,
        LocalLines, MetaParameters, RlsBuilder as Rls, RlsError,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal persistence helpers.
    pub mod io {
        pub use crate::io::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
