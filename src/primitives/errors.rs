//! Error types for RLS training, prediction, and persistence.
//!
//! ## Purpose
//!
//! This module defines the single error enum returned by every fallible
//! operation in the crate. Each variant corresponds to one failure class:
//! configuration, numerical degeneracy, misuse, or persistence.
//!
//! ## Design notes
//!
//! * **Recoverable only**: Precondition violations (mismatched row counts,
//!   wrong input width) are caller bugs and panic instead of returning here.
//! * **Comparable**: The enum is `Clone + PartialEq` so tests can match on
//!   exact values. I/O and JSON errors are flattened into their messages.
//!
//! ## Non-goals
//!
//! * Warnings for misuse (training twice, predicting before training) are
//!   logged, not returned.

// External dependencies
use thiserror::Error;

/// Errors produced by the RLS function approximator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RlsError {
    /// Regularization is negative or not finite.
    #[error("Invalid regularization: {0} (must be >= 0 and finite)")]
    InvalidRegularization(f64),

    /// Pruning threshold is negative or not finite.
    #[error("Invalid epsilon: {0} (must be >= 0 and finite)")]
    InvalidEpsilon(f64),

    /// Kernel geometry is inconsistent (shape, width, or count).
    #[error("Invalid kernels: {0}")]
    InvalidKernels(String),

    /// Grid bounds or sample counts are inconsistent.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// A required builder parameter was never set.
    #[error("Parameter '{parameter}' is required")]
    MissingParameter {
        /// Name of the missing parameter
        parameter: &'static str,
    },

    /// A builder parameter was set more than once.
    #[error(
        "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
    )]
    DuplicateParameter {
        /// Name of the duplicated parameter
        parameter: &'static str,
    },

    /// The weighted normal equations of a kernel are rank deficient.
    #[error("Singular weighted normal equations for kernel {kernel}")]
    SingularSystem {
        /// Index of the kernel whose fit failed
        kernel: usize,
    },

    /// Pruning left a kernel without any samples.
    #[error("Degenerate fit for kernel {kernel}: no samples with activation >= {epsilon}")]
    DegenerateKernel {
        /// Index of the kernel whose fit failed
        kernel: usize,
        /// Pruning threshold in effect
        epsilon: f64,
    },

    /// Operation requires a trained model.
    #[error("Function approximator has not been trained")]
    NotTrained,

    /// Target file exists and overwriting was not allowed.
    #[error("File already exists: {path} (overwrite disabled)")]
    FileExists {
        /// Path of the existing file
        path: String,
    },

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON encoding or decoding failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A persisted matrix could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<std::io::Error> for RlsError {
    fn from(err: std::io::Error) -> Self {
        RlsError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RlsError {
    fn from(err: serde_json::Error) -> Self {
        RlsError::Serialization(err.to_string())
    }
}
