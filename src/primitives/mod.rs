//! Layer 1: Primitives
//!
//! # Purpose
//!
//! Foundational types shared by every other layer:
//! - The crate error enum
//! - Reusable scratch buffers for training and prediction
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types.
pub mod errors;

/// Training and prediction scratch buffers.
pub mod buffer;
