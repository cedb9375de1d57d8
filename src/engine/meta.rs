//! Meta parameters of the RLS approximator.
//!
//! These are the training settings that are not learned from data. They are
//! validated once when the approximator is built and persisted alongside the
//! fitted model.

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::errors::RlsError;

/// Training settings for [`FunctionApproximatorRls`](crate::approximator::FunctionApproximatorRls).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetaParameters<T> {
    /// Ridge term added to the diagonal of `X'WX`.
    pub regularization: T,
    /// Fit a constant offset per kernel.
    pub use_offset: bool,
    /// Samples with activation below this are dropped from a kernel's fit.
    /// Zero disables pruning.
    pub epsilon: T,
}

impl<T: Float> Default for MetaParameters<T> {
    fn default() -> Self {
        Self {
            regularization: T::zero(),
            use_offset: true,
            epsilon: T::zero(),
        }
    }
}

impl<T: Float> MetaParameters<T> {
    /// Create validated meta parameters.
    pub fn new(regularization: T, use_offset: bool, epsilon: T) -> Result<Self, RlsError> {
        let meta = Self {
            regularization,
            use_offset,
            epsilon,
        };
        meta.validate()?;
        Ok(meta)
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), RlsError> {
        Validator::validate_regularization(self.regularization)?;
        Validator::validate_epsilon(self.epsilon)
    }
}
