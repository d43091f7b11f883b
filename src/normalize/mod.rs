//! Word normalization.
//!
//! Reduces user input to the canonical form used as a cache key: lowercase,
//! punctuation-free, trimmed, and lemmatized through a pluggable
//! [`Lemmatizer`].

pub mod lemmatizer;
pub mod normalizer;

pub use lemmatizer::*;
pub use normalizer::*;
