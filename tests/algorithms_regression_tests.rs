#![cfg(feature = "dev")]
//! Tests for the per-kernel weighted least-squares machinery.
//!
//! ## Test Organization
//!
//! 1. **Design Matrix** - Offset column handling
//! 2. **Row Selection** - Pruning threshold semantics
//! 3. **Normal Equations** - Accumulation against hand-computed values
//! 4. **Solver** - Dense, pruned and regularized fits
//! 5. **Local Lines** - Line evaluation

use approx::assert_relative_eq;

use rls_rs::internals::algorithms::design::DesignMatrix;
use rls_rs::internals::algorithms::lines::LocalLines;
use rls_rs::internals::algorithms::regression::{
    accumulate_normal_equations, select_rows, WeightedLeastSquares,
};
use rls_rs::internals::math::kernel::GaussianKernels;
use rls_rs::internals::primitives::errors::RlsError;

// ============================================================================
// Design Matrix
// ============================================================================

/// An offset appends a column of ones.
#[test]
fn test_design_with_offset() {
    let design = DesignMatrix::build(&[1.0_f64, 2.0, 3.0, 4.0], 2, true);
    assert_eq!(design.n_rows(), 2);
    assert_eq!(design.n_betas(), 3);
    assert_eq!(design.row(0), &[1.0, 2.0, 1.0]);
    assert_eq!(design.row(1), &[3.0, 4.0, 1.0]);
}

/// Without an offset the design is the inputs.
#[test]
fn test_design_without_offset() {
    let design = DesignMatrix::build(&[1.0_f64, 2.0, 3.0], 1, false);
    assert_eq!(design.n_rows(), 3);
    assert_eq!(design.n_betas(), 1);
    assert_eq!(design.as_slice(), &[1.0, 2.0, 3.0]);
}

// ============================================================================
// Row Selection
// ============================================================================

/// Rows at or above the threshold are kept in order.
#[test]
fn test_select_rows_threshold_inclusive() {
    let mut rows = vec![99];
    select_rows(&[0.5, 0.05, 0.1, 0.0, 0.9], 0.1, &mut rows);
    assert_eq!(rows, vec![0, 2, 4]);
}

/// A threshold above every weight selects nothing.
#[test]
fn test_select_rows_empty() {
    let mut rows = Vec::new();
    select_rows(&[0.01, 0.02], 0.5, &mut rows);
    assert!(rows.is_empty());
}

// ============================================================================
// Normal Equations
// ============================================================================

/// Hand-computed X'WX and X'Wy.
#[test]
fn test_accumulate_normal_equations() {
    let design = [1.0, 1.0, 2.0, 1.0];
    let mut xtw_x = [f64::NAN; 4];
    let mut xtw_y = [f64::NAN; 2];
    accumulate_normal_equations(&design, &[3.0, 5.0], &[1.0, 2.0], 2, &mut xtw_x, &mut xtw_y);
    assert_eq!(xtw_x, [9.0, 5.0, 5.0, 3.0]);
    assert_eq!(xtw_y, [23.0, 13.0]);
}

// ============================================================================
// Solver
// ============================================================================

/// The dense path fits a weighted line.
#[test]
fn test_fit_kernel_dense() {
    let design = DesignMatrix::build(&[0.0_f64, 1.0, 2.0, 3.0], 1, true);
    let mut solver = WeightedLeastSquares::new(4, 2, 0.0, 0.0);
    assert!(!solver.prunes());

    let beta = solver
        .fit_kernel(0, &design, &[1.0, 3.0, 5.0, 7.0], &[0.2, 1.0, 0.5, 0.1])
        .unwrap();
    assert_relative_eq!(beta[0], 2.0, epsilon = 1e-10);
    assert_relative_eq!(beta[1], 1.0, epsilon = 1e-10);
}

/// Pruning removes a low-weight outlier from the fit.
#[test]
fn test_fit_kernel_pruned_drops_outlier() {
    let design = DesignMatrix::build(&[0.0_f64, 1.0, 2.0, 3.0], 1, true);
    let targets = [0.0, 2.0, 4.0, 100.0];
    let weights = [1.0, 1.0, 1.0, 0.01];

    let mut dense = WeightedLeastSquares::new(4, 2, 0.0, 0.0);
    let dense_beta = dense.fit_kernel(0, &design, &targets, &weights).unwrap();
    assert!((dense_beta[0] - 2.0).abs() > 0.1);

    let mut pruned = WeightedLeastSquares::new(4, 2, 0.0, 0.1);
    assert!(pruned.prunes());
    let beta = pruned.fit_kernel(0, &design, &targets, &weights).unwrap();
    assert_relative_eq!(beta[0], 2.0, epsilon = 1e-10);
    assert_relative_eq!(beta[1], 0.0, epsilon = 1e-10);
}

/// An empty pruned subset is a degenerate kernel.
#[test]
fn test_fit_kernel_pruned_empty() {
    let design = DesignMatrix::build(&[0.0_f64, 1.0], 1, true);
    let mut solver = WeightedLeastSquares::new(2, 2, 0.0, 0.5);
    let result = solver.fit_kernel(3, &design, &[0.0, 1.0], &[0.1, 0.2]);
    assert_eq!(
        result,
        Err(RlsError::DegenerateKernel {
            kernel: 3,
            epsilon: 0.5
        })
    );
}

/// Too few kept rows leave the system singular.
#[test]
fn test_fit_kernel_pruned_singular() {
    let design = DesignMatrix::build(&[0.0_f64, 1.0, 2.0], 1, true);
    let mut solver = WeightedLeastSquares::new(3, 2, 0.0, 0.5);
    let result = solver.fit_kernel(1, &design, &[0.0, 1.0, 2.0], &[0.1, 0.9, 0.2]);
    assert_eq!(result, Err(RlsError::SingularSystem { kernel: 1 }));
}

/// Regularization makes an otherwise singular system solvable.
#[test]
fn test_fit_kernel_regularized_singular() {
    let design = DesignMatrix::build(&[1.0_f64, 1.0], 1, true);
    let mut plain = WeightedLeastSquares::new(2, 2, 0.0, 0.0);
    assert!(plain.fit_kernel(0, &design, &[2.0, 2.0], &[1.0, 1.0]).is_err());

    let mut ridge = WeightedLeastSquares::new(2, 2, 1e-3, 0.0);
    let beta = ridge.fit_kernel(0, &design, &[2.0, 2.0], &[1.0, 1.0]).unwrap();
    // Symmetric in slope and offset, prediction at x = 1 close to 2
    assert_relative_eq!(beta[0], beta[1], epsilon = 1e-9);
    assert_relative_eq!(beta[0] + beta[1], 2.0, epsilon = 1e-3);
}

/// Column extraction from a row-major activation matrix.
#[test]
fn test_fit_column() {
    let design = DesignMatrix::build(&[0.0_f64, 1.0, 2.0], 1, true);
    let targets = [1.0, 2.0, 3.0];
    // Kernel 1 weights are [0.5, 0.5, 0.5]
    let activations = [0.5, 0.5, 0.5, 0.5, 0.5, 0.5];
    let mut solver = WeightedLeastSquares::new(3, 2, 0.0, 0.0);
    let beta = solver
        .fit_column(1, &design, &targets, &activations, 2)
        .unwrap();
    assert_relative_eq!(beta[0], 1.0, epsilon = 1e-10);
    assert_relative_eq!(beta[1], 1.0, epsilon = 1e-10);
}

// ============================================================================
// Local Lines
// ============================================================================

/// Line values are slope . x + offset per kernel.
#[test]
fn test_local_lines_values() {
    let kernels = GaussianKernels::new(vec![0.0, 0.0, 1.0, 1.0], vec![1.0; 4], 2).unwrap();
    let lines = LocalLines::new(kernels, vec![1.0, 2.0, -1.0, 0.5], vec![0.0, 3.0]);
    assert_eq!(lines.n_basis_functions(), 2);
    assert_eq!(lines.input_dim(), 2);
    assert!(lines.is_consistent());
    assert_eq!(lines.slope(1), &[-1.0, 0.5]);
    assert_eq!(lines.offset(1), 3.0);

    let mut out = [0.0; 4];
    lines.lines_into(&[1.0, 1.0, 2.0, 0.0], &mut out);
    assert_eq!(out, [3.0, 2.5, 2.0, 1.0]);
}

/// Mismatched slope counts are rejected.
#[test]
#[should_panic]
fn test_local_lines_shape_mismatch() {
    let kernels = GaussianKernels::new(vec![0.0, 1.0], vec![1.0, 1.0], 1).unwrap();
    let _ = LocalLines::new(kernels, vec![1.0], vec![0.0, 0.0]);
}
