//! Lexical database access.
//!
//! The lookup engine treats the lexicon as an external collaborator: given a
//! word it returns zero or more ordered senses, and for a sense its broader
//! (hypernym) and narrower (hyponym) senses. Every call returns a `Result` so
//! that an unavailable backend is visible to the caller, which decides how
//! to recover.

pub mod builtin;
pub mod memory;

pub use builtin::*;
pub use memory::*;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single meaning of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    /// Stable identifier, e.g. `python.n.01`.
    pub id: String,
    /// Gloss text; may be empty for bare relation nodes.
    pub definition: String,
    /// Words expressing this sense. Multi-word lemmas join their words with
    /// `_`.
    pub lemmas: Vec<String>,
}

impl Sense {
    pub fn new<S: Into<String>>(id: S, definition: S, lemmas: Vec<String>) -> Self {
        Sense {
            id: id.into(),
            definition: definition.into(),
            lemmas,
        }
    }
}

/// Read access to a lexical database.
pub trait Lexicon: Send + Sync {
    /// Senses of `word`, most common first.
    fn senses_of(&self, word: &str) -> Result<Vec<Sense>>;

    /// Senses directly broader than `sense`.
    fn broader(&self, sense: &Sense) -> Result<Vec<Sense>>;

    /// Senses directly narrower than `sense`.
    fn narrower(&self, sense: &Sense) -> Result<Vec<Sense>>;

    /// Every sense in the database, lazily.
    fn all_senses(&self) -> Result<Box<dyn Iterator<Item = Sense> + '_>>;

    /// Get the name of this lexicon.
    fn name(&self) -> &'static str;
}
