//! Persistence helpers.
//!
//! # Purpose
//!
//! Plain-text matrix files used by the grid diagnostic export. JSON
//! serialization of the approximator itself lives on the approximator.

/// Whitespace-separated matrix files.
pub mod matrix;
