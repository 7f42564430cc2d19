//! # Mathematical Functions
//!
//! Checked integer arithmetic and the fixed-point reward index.

pub mod index;
pub mod safe_math;

// Re-export commonly used functions
pub use index::*;
pub use safe_math::*;
