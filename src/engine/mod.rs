//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the algorithms into the approximator's operations:
//! - Parameter validation and meta parameters
//! - Training of the local line model
//! - Single-sample and batch prediction
//! - Diagnostic grid export
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Input validation.
pub mod validator;

/// Meta parameters.
pub mod meta;

/// Training.
pub mod trainer;

/// Prediction.
pub mod predictor;

/// Grid diagnostic export.
pub mod grid_export;
