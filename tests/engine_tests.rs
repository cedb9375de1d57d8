#![cfg(feature = "dev")]
//! Tests for the engine layer: validation, buffers and prediction.
//!
//! ## Test Organization
//!
//! 1. **Validator** - Parameter checks and shape assertions
//! 2. **Prediction Buffer** - Row capacity management
//! 3. **Predictor** - Blending and path dispatch
//! 4. **Trainer** - Slope/offset split

use approx::assert_relative_eq;

use rls_rs::internals::algorithms::lines::LocalLines;
use rls_rs::internals::engine::meta::MetaParameters;
use rls_rs::internals::engine::predictor::{blend_into, predict_batch_into, predict_single_into};
use rls_rs::internals::engine::trainer::fit_local_lines;
use rls_rs::internals::engine::validator::Validator;
use rls_rs::internals::math::kernel::GaussianKernels;
use rls_rs::internals::primitives::buffer::PredictionBuffer;
use rls_rs::internals::primitives::errors::RlsError;

fn two_kernel_lines() -> LocalLines<f64, GaussianKernels<f64>> {
    let kernels = GaussianKernels::new(vec![0.0, 1.0], vec![0.5, 0.5], 1).unwrap();
    LocalLines::new(kernels, vec![1.0, -1.0], vec![0.0, 2.0])
}

// ============================================================================
// Validator
// ============================================================================

#[test]
fn test_validate_parameters() {
    assert!(Validator::validate_regularization(0.0).is_ok());
    assert!(Validator::validate_regularization(3.5).is_ok());
    assert_eq!(
        Validator::validate_regularization(-0.1),
        Err(RlsError::InvalidRegularization(-0.1))
    );
    assert!(Validator::validate_regularization(f64::INFINITY).is_err());

    assert!(Validator::validate_epsilon(0.0).is_ok());
    assert_eq!(
        Validator::validate_epsilon(-1.0),
        Err(RlsError::InvalidEpsilon(-1.0))
    );

    assert_eq!(
        Validator::validate_no_duplicates(Some("epsilon")),
        Err(RlsError::DuplicateParameter {
            parameter: "epsilon"
        })
    );
    assert!(Validator::validate_no_duplicates(None).is_ok());
}

#[test]
fn test_validate_grid_dimension() {
    assert!(Validator::validate_grid(&[0.0], &[1.0], &[3], 1).is_ok());
    assert!(matches!(
        Validator::validate_grid(&[0.0], &[1.0], &[3], 2),
        Err(RlsError::InvalidGrid(_))
    ));
}

#[test]
fn test_meta_parameters() {
    let meta = MetaParameters::<f64>::default();
    assert_eq!(meta.regularization, 0.0);
    assert!(meta.use_offset);
    assert_eq!(meta.epsilon, 0.0);

    assert!(MetaParameters::new(0.1, false, 1e-3).is_ok());
    assert_eq!(
        MetaParameters::new(0.0, true, -1.0),
        Err(RlsError::InvalidEpsilon(-1.0))
    );
}

#[test]
#[should_panic]
fn test_assert_training_shapes_panics() {
    Validator::assert_training_shapes(&[1.0, 2.0, 3.0], &[1.0, 2.0], 1);
}

#[test]
fn test_assert_prediction_shapes() {
    assert_eq!(
        Validator::assert_prediction_shapes(&[1.0, 2.0, 3.0, 4.0], &[0.0, 0.0], 2),
        2
    );
}

#[test]
#[should_panic]
fn test_assert_prediction_shapes_partial_row() {
    Validator::assert_prediction_shapes(&[1.0, 2.0, 3.0], &[0.0], 2);
}

// ============================================================================
// Prediction Buffer
// ============================================================================

#[test]
fn test_prediction_buffer_rows() {
    let mut buffer = PredictionBuffer::<f64>::new(3);
    assert_eq!(buffer.rows(), 1);

    let (lines, activations) = buffer.split_rows_mut(1);
    assert_eq!(lines.len(), 3);
    assert_eq!(activations.len(), 3);

    buffer.resize_rows(4);
    assert_eq!(buffer.rows(), 4);
    let (lines, _) = buffer.split_rows_mut(2);
    assert_eq!(lines.len(), 6);
}

#[test]
#[should_panic]
fn test_prediction_buffer_overflow_panics() {
    let mut buffer = PredictionBuffer::<f64>::new(2);
    let _ = buffer.split_rows_mut(2);
}

// ============================================================================
// Predictor
// ============================================================================

#[test]
fn test_blend_into() {
    let lines = [1.0, 2.0, 3.0, 4.0];
    let activations = [0.5, 0.5, 0.25, 0.75];
    let mut outputs = [0.0; 2];
    blend_into(&lines, &activations, 2, &mut outputs);
    assert_eq!(outputs, [1.5, 3.75]);
}

#[test]
fn test_single_path_does_not_resize() {
    let lines = two_kernel_lines();
    let mut buffer = PredictionBuffer::new(2);
    let mut output = [0.0];
    predict_single_into(&lines, &mut buffer, &[0.5], &mut output);
    assert_eq!(buffer.rows(), 1);

    // Symmetric point: equal weights, lines give 0.5 and 1.5
    assert_relative_eq!(output[0], 1.0, epsilon = 1e-12);
}

#[test]
fn test_batch_path_resizes() {
    let lines = two_kernel_lines();
    let mut buffer = PredictionBuffer::new(2);
    let inputs = [0.0, 0.5, 1.0];
    let mut outputs = [0.0; 3];
    predict_batch_into(&lines, &mut buffer, &inputs, &mut outputs);
    assert_eq!(buffer.rows(), 3);

    for (x, y) in inputs.iter().zip(&outputs) {
        let mut single = [0.0];
        predict_single_into(&lines, &mut buffer, &[*x], &mut single);
        assert_relative_eq!(single[0], *y, epsilon = 1e-15);
    }
}

// ============================================================================
// Trainer
// ============================================================================

#[test]
fn test_trainer_splits_offset() {
    let kernels = GaussianKernels::new(vec![0.0_f64], vec![1.0], 1).unwrap();
    let meta = MetaParameters::default();
    let lines = fit_local_lines(&kernels, &meta, &[0.0, 1.0, 2.0], &[-1.0, 1.0, 3.0]).unwrap();
    assert_relative_eq!(lines.slope(0)[0], 2.0, epsilon = 1e-10);
    assert_relative_eq!(lines.offset(0), -1.0, epsilon = 1e-10);

    let meta = MetaParameters::new(0.0, false, 0.0).unwrap();
    let lines = fit_local_lines(&kernels, &meta, &[1.0, 2.0], &[2.0, 4.0]).unwrap();
    assert_relative_eq!(lines.slope(0)[0], 2.0, epsilon = 1e-10);
    assert_eq!(lines.offset(0), 0.0);
}
