//! The RLS function approximator.
//!
//! ## Purpose
//!
//! This module ties the layers together into the object users hold: it owns
//! the kernels, the meta parameters, the trained [`LocalLines`] (once there is
//! one) and the prediction scratch buffer.
//!
//! ## Design notes
//!
//! * **Train once**: `train` on a trained approximator logs a warning and
//!   keeps the existing model. `retrain` is the explicit re-fit.
//! * **Predict before train**: Logs a warning and produces nothing. It is
//!   never an error.
//! * **Real-time path**: `predict_into` with a single row allocates nothing.
//! * **Persistence**: Meta parameters, kernels and the fitted lines serialize
//!   to JSON. The scratch buffer is rebuilt after loading.
//!
//! ## Invariants
//!
//! * `is_trained()` holds exactly when a [`LocalLines`] is installed.
//! * A failed training call leaves the approximator as it was.

// External dependencies
use std::fs;
use std::path::Path;

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::algorithms::lines::LocalLines;
use crate::engine::grid_export::GridData;
use crate::engine::meta::MetaParameters;
use crate::engine::predictor;
use crate::engine::trainer;
use crate::engine::validator::Validator;
use crate::math::kernel::{GaussianKernels, KernelActivations};
use crate::math::linalg::FloatLinalg;
use crate::primitives::buffer::PredictionBuffer;
use crate::primitives::errors::RlsError;

/// Locally weighted least-squares function approximator.
///
/// Fits one linear model per kernel and predicts the activation-weighted blend
/// of those models.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize, K: Serialize",
    deserialize = "T: Deserialize<'de>, K: Deserialize<'de>"
))]
pub struct FunctionApproximatorRls<T, K = GaussianKernels<T>> {
    meta: MetaParameters<T>,
    kernels: K,
    lines: Option<LocalLines<T, K>>,
    #[serde(skip)]
    buffer: PredictionBuffer<T>,
}

impl<T, K> FunctionApproximatorRls<T, K>
where
    T: FloatLinalg,
    K: KernelActivations<T> + Clone,
{
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create an untrained approximator.
    pub fn new(kernels: K, meta: MetaParameters<T>) -> Result<Self, RlsError> {
        Validator::validate_kernels(&kernels)?;
        meta.validate()?;
        Ok(Self {
            meta,
            kernels,
            lines: None,
            buffer: PredictionBuffer::default(),
        })
    }

    /// Create an approximator around an already fitted model.
    pub fn with_model(meta: MetaParameters<T>, lines: LocalLines<T, K>) -> Result<Self, RlsError> {
        let mut approximator = Self::new(lines.kernels().clone(), meta)?;
        approximator.install(lines);
        Ok(approximator)
    }

    fn install(&mut self, lines: LocalLines<T, K>) {
        self.buffer = PredictionBuffer::new(lines.n_basis_functions());
        self.lines = Some(lines);
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Whether a model has been fitted.
    #[inline]
    pub fn is_trained(&self) -> bool {
        self.lines.is_some()
    }

    /// Number of input columns expected by `train` and `predict`.
    #[inline]
    pub fn expected_input_dim(&self) -> usize {
        self.kernels.input_dim()
    }

    /// Number of outputs per sample. Always one.
    #[inline]
    pub fn expected_output_dim(&self) -> usize {
        1
    }

    /// Training settings.
    pub fn meta(&self) -> &MetaParameters<T> {
        &self.meta
    }

    /// Kernels the approximator was built with.
    pub fn kernels(&self) -> &K {
        &self.kernels
    }

    /// The fitted model, if trained.
    pub fn local_lines(&self) -> Option<&LocalLines<T, K>> {
        self.lines.as_ref()
    }

    // ========================================================================
    // Training
    // ========================================================================

    /// Fit the model to `inputs` (row-major, `expected_input_dim()` columns)
    /// and one target per row.
    ///
    /// Does nothing, apart from a warning, if the approximator is already
    /// trained. On error the approximator stays untrained.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` does not hold exactly one row per target.
    pub fn train(&mut self, inputs: &[T], targets: &[T]) -> Result<(), RlsError> {
        if self.is_trained() {
            warn!("function approximator already trained; call retrain to fit again");
            return Ok(());
        }
        self.retrain(inputs, targets)
    }

    /// Fit the model from scratch, replacing any existing fit.
    ///
    /// On error the previous state, trained or not, is kept.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` does not hold exactly one row per target.
    pub fn retrain(&mut self, inputs: &[T], targets: &[T]) -> Result<(), RlsError> {
        Validator::assert_training_shapes(inputs, targets, self.expected_input_dim());
        let lines = trainer::fit_local_lines(&self.kernels, &self.meta, inputs, targets)?;
        self.install(lines);
        Ok(())
    }

    // ========================================================================
    // Prediction
    // ========================================================================

    /// Predict one output per row of `inputs` into `outputs`.
    ///
    /// Returns `false`, leaving `outputs` untouched, if the approximator is not
    /// trained. A single row never allocates.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` is not a whole number of rows or `outputs` does not
    /// have one entry per row.
    pub fn predict_into(&mut self, inputs: &[T], outputs: &mut [T]) -> bool {
        let Some(lines) = self.lines.as_ref() else {
            warn!("function approximator not trained; no predictions made");
            return false;
        };
        Validator::assert_prediction_shapes(inputs, outputs, lines.input_dim());
        predictor::predict_into(lines, &mut self.buffer, inputs, outputs);
        true
    }

    /// Predict one output per row of `inputs`, or `None` if not trained.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` is not a whole number of rows.
    pub fn predict(&mut self, inputs: &[T]) -> Option<Vec<T>> {
        if !self.is_trained() {
            warn!("function approximator not trained; no predictions made");
            return None;
        }
        let dims = self.expected_input_dim();
        assert_eq!(inputs.len() % dims, 0, "inputs must have {} columns", dims);
        let mut outputs = vec![T::zero(); inputs.len() / dims];
        self.predict_into(inputs, &mut outputs);
        Some(outputs)
    }

    // ========================================================================
    // Grid Diagnostics
    // ========================================================================

    /// Evaluate the model's intermediate quantities on a regular grid.
    pub fn grid_data(
        &self,
        min: &[T],
        max: &[T],
        n_samples_per_dim: &[usize],
    ) -> Result<GridData<T>, RlsError> {
        let lines = self.lines.as_ref().ok_or(RlsError::NotTrained)?;
        Validator::validate_grid(min, max, n_samples_per_dim, lines.input_dim())?;
        Ok(GridData::evaluate(lines, min, max, n_samples_per_dim))
    }

    /// Evaluate the model on a regular grid and write the results to
    /// `directory`.
    ///
    /// An empty `directory` succeeds without doing anything.
    pub fn save_grid_data<P: AsRef<Path>>(
        &self,
        min: &[T],
        max: &[T],
        n_samples_per_dim: &[usize],
        directory: P,
        overwrite: bool,
    ) -> Result<(), RlsError> {
        let directory = directory.as_ref();
        if directory.as_os_str().is_empty() {
            return Ok(());
        }
        self.grid_data(min, max, n_samples_per_dim)?
            .save(directory, overwrite)
    }
}

// ============================================================================
// Persistence
// ============================================================================

impl<T, K> FunctionApproximatorRls<T, K>
where
    T: FloatLinalg + Serialize + DeserializeOwned,
    K: KernelActivations<T> + Clone + PartialEq + Serialize + DeserializeOwned,
{
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, RlsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from a JSON string produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, RlsError> {
        let decoded: Self = serde_json::from_str(json)?;
        let mut approximator = Self::new(decoded.kernels, decoded.meta)?;
        if let Some(lines) = decoded.lines {
            if !lines.is_consistent() {
                return Err(RlsError::Serialization(
                    "fitted lines do not match their kernels".to_string(),
                ));
            }
            if lines.kernels() != approximator.kernels() {
                return Err(RlsError::Serialization(
                    "fitted lines use different kernels than the approximator".to_string(),
                ));
            }
            approximator.install(lines);
        }
        Ok(approximator)
    }

    /// Write JSON to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RlsError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read JSON from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RlsError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
