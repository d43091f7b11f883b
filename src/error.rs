//! Error types for the Glossa library.
//!
//! All fallible operations return [`GlossaError`]. Most of them never reach a
//! caller of [`LookupEngine::lookup`](crate::engine::LookupEngine::lookup):
//! lemmatizer and lexicon failures are recovered inside the pipeline and only
//! show up in the log.
//!
//! # Examples
//!
//! ```
//! use glossa::error::{GlossaError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(GlossaError::invalid_argument("empty word"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Glossa operations.
#[derive(Error, Debug)]
pub enum GlossaError {
    /// I/O errors (reading lexicon or configuration files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The lemmatizer could not produce a base form.
    #[error("Lemmatization error: {0}")]
    Lemmatization(String),

    /// The lexical database failed or is unavailable.
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// The definition cache rejected an operation.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument supplied by the caller.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors raised by user-supplied collaborators, such as a custom
    /// [`Lexicon`](crate::lexicon::Lexicon) backend.
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with GlossaError.
pub type Result<T> = std::result::Result<T, GlossaError>;

impl GlossaError {
    /// Create a new lemmatization error.
    pub fn lemmatization<S: Into<String>>(msg: S) -> Self {
        GlossaError::Lemmatization(msg.into())
    }

    /// Create a new lexicon error.
    pub fn lexicon<S: Into<String>>(msg: S) -> Self {
        GlossaError::Lexicon(msg.into())
    }

    /// Create a new cache error.
    pub fn cache<S: Into<String>>(msg: S) -> Self {
        GlossaError::Cache(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        GlossaError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        GlossaError::InvalidArgument(msg.into())
    }
}
