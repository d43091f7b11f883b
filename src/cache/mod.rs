//! Frequency-aware definition cache.
//!
//! Maps normalized words to their resolved definitions and counts how often
//! each word is served. The counts feed the fuzzy matcher's frequency boost.

pub mod definition;
pub mod eviction;

pub use definition::*;
pub use eviction::*;
