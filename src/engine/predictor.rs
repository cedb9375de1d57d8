//! Kernel-blended prediction.
//!
//! ## Purpose
//!
//! This module evaluates a trained [`LocalLines`] model: every output is the
//! activation-weighted sum of the local line values at its input,
//! `y = sum_k line_k(x) * activation_k(x)`.
//!
//! ## Design notes
//!
//! * **Single-sample path**: Uses the first row of the pre-sized
//!   [`PredictionBuffer`]. No allocation, no resize.
//! * **Batch path**: Resizes the buffer to `rows x n_kernels`, evaluates all
//!   rows, then blends.
//! * Both paths share [`blend_into`], so they agree row for row.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::lines::LocalLines;
use crate::math::kernel::KernelActivations;
use crate::primitives::buffer::PredictionBuffer;

/// Row sums of the elementwise product of `lines` and `activations`.
#[inline]
pub fn blend_into<T: Float>(lines: &[T], activations: &[T], n_kernels: usize, outputs: &mut [T]) {
    let rows = lines
        .chunks_exact(n_kernels)
        .zip(activations.chunks_exact(n_kernels));
    for (out, (line_row, activation_row)) in outputs.iter_mut().zip(rows) {
        *out = line_row
            .iter()
            .zip(activation_row)
            .fold(T::zero(), |acc, (&l, &a)| acc + l * a);
    }
}

/// Predict one sample using the first row of `buffer`.
pub fn predict_single_into<T: Float, K: KernelActivations<T>>(
    model: &LocalLines<T, K>,
    buffer: &mut PredictionBuffer<T>,
    input: &[T],
    output: &mut [T],
) {
    debug_assert_eq!(input.len(), model.input_dim());
    debug_assert_eq!(output.len(), 1);

    let n_kernels = model.n_basis_functions();
    let (lines, activations) = buffer.split_rows_mut(1);
    model.lines_into(input, lines);
    model.kernel_activations_into(input, activations);
    blend_into(lines, activations, n_kernels, output);
}

/// Predict every row of `inputs`, resizing `buffer` to the row count.
pub fn predict_batch_into<T: Float, K: KernelActivations<T>>(
    model: &LocalLines<T, K>,
    buffer: &mut PredictionBuffer<T>,
    inputs: &[T],
    outputs: &mut [T],
) {
    let rows = outputs.len();
    debug_assert_eq!(inputs.len(), rows * model.input_dim());

    if buffer.rows() != rows {
        buffer.resize_rows(rows);
    }
    let n_kernels = model.n_basis_functions();
    let (lines, activations) = buffer.split_rows_mut(rows);
    model.lines_into(inputs, lines);
    model.kernel_activations_into(inputs, activations);
    blend_into(lines, activations, n_kernels, outputs);
}

/// Dispatch on the number of rows in `outputs`.
pub fn predict_into<T: Float, K: KernelActivations<T>>(
    model: &LocalLines<T, K>,
    buffer: &mut PredictionBuffer<T>,
    inputs: &[T],
    outputs: &mut [T],
) {
    match outputs.len() {
        0 => {}
        1 => predict_single_into(model, buffer, inputs, outputs),
        _ => predict_batch_into(model, buffer, inputs, outputs),
    }
}
