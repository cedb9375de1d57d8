//! Memory management and buffer recycling for RLS training and prediction.
//!
//! ## Purpose
//!
//! This module provides the scratch space used by the trainer and the
//! predictor. Training reuses one `FittingBuffer` across all kernels; the
//! predictor owns a `PredictionBuffer` whose size is an explicit row capacity.
//!
//! ## Design notes
//!
//! * **Explicit capacity**: `PredictionBuffer` is sized to `rows x n_kernels`.
//!   Only `resize_rows` changes that size, and only the batch prediction path
//!   calls it.
//! * **Logical clearing**: Buffers are cleared with `Vec::clear`, never
//!   deallocated, between kernels.
//!
//! ## Key concepts
//!
//! * **Slot**: A reusable vector with monotonic capacity.
//! * **FittingBuffer**: Normal-equation accumulators and the pruned row subset.
//! * **PredictionBuffer**: Per-kernel line values and activations.
//!
//! ## Invariants
//!
//! * After `PredictionBuffer::new(k)` both arrays hold at least `k` values, so
//!   a single-sample prediction never needs to grow them.
//!
//! ## Non-goals
//!
//! * Thread-safety. Buffers are mutated in place through `&mut self`.

// External dependencies
use core::ops::{Deref, DerefMut};
use num_traits::Float;

// ============================================================================
// Slot - Unified Vector Abstraction
// ============================================================================

/// A reusable vector slot with automatic capacity management.
#[derive(Debug, Clone)]
pub struct Slot<T>(Vec<T>);

impl<T> Slot<T> {
    /// Create a new slot with the given initial capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Clear the slot (sets length to 0, preserves capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Slot<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Slot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// ============================================================================
// Training Buffers
// ============================================================================

/// Persistent buffers for the per-kernel weighted least-squares solves.
#[derive(Debug, Clone)]
pub struct FittingBuffer<T> {
    /// Activation column of the kernel being fitted.
    pub weights: Slot<T>,
    /// Normal matrix X'WX.
    pub xtw_x: Slot<T>,
    /// Normal vector X'Wy.
    pub xtw_y: Slot<T>,
    /// Indices of the samples kept by pruning.
    pub rows: Slot<usize>,
    /// Design rows of the kept samples.
    pub sub_design: Slot<T>,
    /// Weights of the kept samples.
    pub sub_weights: Slot<T>,
    /// Targets of the kept samples.
    pub sub_targets: Slot<T>,
}

impl<T> FittingBuffer<T> {
    /// Create a new fitting buffer for `n` samples and `n_betas` coefficients.
    pub fn new(n: usize, n_betas: usize) -> Self {
        Self {
            weights: Slot::new(n),
            xtw_x: Slot::new(n_betas * n_betas),
            xtw_y: Slot::new(n_betas),
            rows: Slot::new(n),
            sub_design: Slot::new(n * n_betas),
            sub_weights: Slot::new(n),
            sub_targets: Slot::new(n),
        }
    }
}

// ============================================================================
// Prediction Buffers
// ============================================================================

/// Pre-sized scratch arena for kernel-blended prediction.
///
/// Holds `rows x n_kernels` line values and activations, row-major.
#[derive(Debug, Clone)]
pub struct PredictionBuffer<T> {
    lines: Slot<T>,
    activations: Slot<T>,
    n_kernels: usize,
    rows: usize,
}

impl<T> Default for PredictionBuffer<T> {
    fn default() -> Self {
        Self {
            lines: Slot::default(),
            activations: Slot::default(),
            n_kernels: 0,
            rows: 0,
        }
    }
}

impl<T: Float> PredictionBuffer<T> {
    /// Create a buffer sized for a single sample (`1 x n_kernels`).
    pub fn new(n_kernels: usize) -> Self {
        let mut buffer = Self {
            lines: Slot::new(n_kernels),
            activations: Slot::new(n_kernels),
            n_kernels,
            rows: 0,
        };
        buffer.resize_rows(1);
        buffer
    }

    /// Resize to `rows x n_kernels`. May allocate.
    pub fn resize_rows(&mut self, rows: usize) {
        let len = rows * self.n_kernels;
        self.lines.resize(len, T::zero());
        self.activations.resize(len, T::zero());
        self.rows = rows;
    }

    /// Number of rows the buffer currently holds.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Mutable views of the first `rows` rows of line values and activations.
    ///
    /// # Panics
    ///
    /// Panics if `rows` exceeds the current row count.
    #[inline]
    pub fn split_rows_mut(&mut self, rows: usize) -> (&mut [T], &mut [T]) {
        assert!(
            rows <= self.rows,
            "Prediction buffer holds {} rows, requested {}",
            self.rows,
            rows
        );
        let len = rows * self.n_kernels;
        (&mut self.lines[..len], &mut self.activations[..len])
    }
}
