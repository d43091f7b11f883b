//! # Glossa
//!
//! A typo-tolerant dictionary lookup engine.
//!
//! ## Features
//!
//! - Normalization with a pluggable lemmatizer
//! - Bounded, lazily generated spelling variants
//! - Weighted multi-measure fuzzy matching with frequency boosting
//! - Thread-safe definition cache with optional capacity and eviction
//! - Pluggable lexicon backends, with a built-in computing vocabulary
//!
//! ```
//! use std::sync::Arc;
//!
//! use glossa::engine::LookupEngine;
//! use glossa::lexicon::BuiltinLexicon;
//!
//! let engine = LookupEngine::new(Arc::new(BuiltinLexicon::computing()?))?;
//! engine.initialize()?;
//!
//! let result = engine.lookup("PYTHON");
//! assert_eq!(result.word(), Some("python"));
//! # Ok::<(), glossa::error::GlossaError>(())
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod normalize;
pub mod spelling;

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::{LookupEngine, SearchResult};
    pub use crate::error::{GlossaError, Result};
    pub use crate::lexicon::{BuiltinLexicon, Lexicon, MemoryLexicon, Sense};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
