//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the core fitting machinery:
//! - Design matrix construction
//! - Per-kernel weighted least squares (dense and pruned)
//! - The fitted local line model
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Design matrix construction.
pub mod design;

/// Per-kernel weighted least squares.
pub mod regression;

/// Fitted local line model.
pub mod lines;
