//! Canonical word normalization.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::normalize::lemmatizer::{Lemmatizer, SuffixLemmatizer};

/// Upper bound on lemmatizer passes while searching for a fixed point.
const MAX_LEMMA_PASSES: usize = 4;

/// Lowercase, strip ASCII punctuation and trim surrounding whitespace.
///
/// Trimming happens after punctuation removal so that input such as `"a ."`
/// does not leave a trailing space behind.
pub fn clean(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    stripped.trim().to_string()
}

/// Reduces raw user input to a canonical lemma.
///
/// Normalization never fails. When the lemmatizer errors, returns an empty
/// lemma, or does not settle on a fixed point within a few passes, the
/// cleaned (un-lemmatized) word is returned instead. Because every outcome is
/// either a fixed point of the lemmatizer or the cleaned input, normalizing
/// twice always yields the same value as normalizing once.
#[derive(Clone)]
pub struct Normalizer {
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl Normalizer {
    /// Create a normalizer backed by the [`SuffixLemmatizer`].
    pub fn new() -> Self {
        Normalizer {
            lemmatizer: Arc::new(SuffixLemmatizer::new()),
        }
    }

    /// Create a normalizer with a custom lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Normalizer { lemmatizer }
    }

    /// Get the name of the configured lemmatizer.
    pub fn lemmatizer_name(&self) -> &'static str {
        self.lemmatizer.name()
    }

    /// Normalize a raw word.
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = clean(raw);
        if cleaned.is_empty() {
            return cleaned;
        }

        self.settle(&cleaned).unwrap_or(cleaned)
    }

    /// Apply the lemmatizer until its output stops changing.
    fn settle(&self, cleaned: &str) -> Option<String> {
        let mut current = cleaned.to_string();

        for _ in 0..MAX_LEMMA_PASSES {
            let lemma = match self.lemmatizer.lemmatize(&current) {
                Ok(lemma) => clean(&lemma),
                Err(e) => {
                    debug!("lemmatizer '{}' failed on '{current}': {e}", self.lemmatizer.name());
                    return None;
                }
            };

            if lemma.is_empty() {
                return None;
            }
            if lemma == current {
                return Some(current);
            }
            current = lemma;
        }

        debug!(
            "lemmatizer '{}' did not settle on '{cleaned}'",
            self.lemmatizer.name()
        );
        None
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GlossaError, Result};
    use crate::normalize::lemmatizer::IdentityLemmatizer;

    struct FailingLemmatizer;

    impl Lemmatizer for FailingLemmatizer {
        fn lemmatize(&self, _word: &str) -> Result<String> {
            Err(GlossaError::lemmatization("model not loaded"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    /// Appends a character forever, so it never reaches a fixed point.
    struct GrowingLemmatizer;

    impl Lemmatizer for GrowingLemmatizer {
        fn lemmatize(&self, word: &str) -> Result<String> {
            Ok(format!("{word}x"))
        }

        fn name(&self) -> &'static str {
            "growing"
        }
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean("  Hello, World!  "), "hello world");
        assert_eq!(clean("a ."), "a");
        assert_eq!(clean("..."), "");
        assert_eq!(clean("don't"), "dont");
        assert_eq!(clean("new_york"), "newyork");
    }

    #[test]
    fn test_normalize_lemmatizes() {
        let normalizer = Normalizer::new();

        assert_eq!(normalizer.normalize("Computers"), "computer");
        assert_eq!(normalizer.normalize("  BOXES! "), "box");
        assert_eq!(normalizer.normalize("python"), "python");
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("?!"), "");
    }

    #[test]
    fn test_normalize_falls_back_on_lemmatizer_failure() {
        let normalizer = Normalizer::with_lemmatizer(Arc::new(FailingLemmatizer));
        assert_eq!(normalizer.normalize("Cookies!"), "cookies");
    }

    #[test]
    fn test_normalize_falls_back_when_unsettled() {
        let normalizer = Normalizer::with_lemmatizer(Arc::new(GrowingLemmatizer));
        assert_eq!(normalizer.normalize("Word"), "word");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "Computers",
            "glasses",
            "analyses",
            "a .",
            "  Hello, World!  ",
            "properties",
            "houses",
            "mice",
            "ÄRGER",
            "x",
            "",
            "..",
            "ties",
            "buses",
        ];

        for normalizer in [
            Normalizer::new(),
            Normalizer::with_lemmatizer(Arc::new(IdentityLemmatizer::new())),
            Normalizer::with_lemmatizer(Arc::new(FailingLemmatizer)),
            Normalizer::with_lemmatizer(Arc::new(GrowingLemmatizer)),
        ] {
            for input in inputs {
                let once = normalizer.normalize(input);
                let twice = normalizer.normalize(&once);
                assert_eq!(once, twice, "normalization of {input:?} is not idempotent");
            }
        }
    }
}
