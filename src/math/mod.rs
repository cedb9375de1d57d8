//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical building blocks:
//! - The dense normal-equation solver
//! - Kernel activation functions
//! - Regular grid generation
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Linear algebra backend.
pub mod linalg;

/// Kernel (activation) functions.
pub mod kernel;

/// Regular input grids.
pub mod grid;
