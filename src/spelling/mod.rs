//! Approximate string matching.
//!
//! Bounded spelling-variant generation, rapidfuzz-style similarity measures
//! and the weighted multi-measure matcher that ranks candidate words.

pub mod matcher;
pub mod similarity;
pub mod variations;

pub use matcher::*;
pub use similarity::*;
pub use variations::*;
