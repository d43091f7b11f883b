//! Lemmatizer implementations.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;

use crate::error::{GlossaError, Result};
use crate::lexicon::Lexicon;

/// Trait for reducing a word to its base form.
///
/// Implementations report failure through `Result` instead of panicking; the
/// [`Normalizer`](super::Normalizer) recovers by keeping the un-lemmatized
/// word.
pub trait Lemmatizer: Send + Sync {
    /// Reduce a lowercase word to its lemma.
    fn lemmatize(&self, word: &str) -> Result<String>;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

/// Lemmatizer that returns words unchanged.
#[derive(Debug, Clone, Default)]
pub struct IdentityLemmatizer;

impl IdentityLemmatizer {
    pub fn new() -> Self {
        IdentityLemmatizer
    }
}

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize(&self, word: &str) -> Result<String> {
        Ok(word.to_string())
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Noun-plural detachment rules, tried in order. The first rule whose suffix
/// matches and leaves a long enough stem wins.
const DETACHMENT_RULES: &[(&str, &str)] = &[
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("xes", "x"),
    ("ies", "y"),
    ("s", ""),
];

/// Base-form substitutions tried against a lexicon, in WordNet morphy order.
const BASE_FORM_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Endings that look plural but are not.
const PROTECTED_ENDINGS: &[&str] = &["ss", "us", "is"];

/// Words whose plural form is irregular.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("men", "man"),
    ("mice", "mouse"),
    ("teeth", "tooth"),
    ("women", "woman"),
];

/// Words that end in `s` but are already in base form.
const UNINFLECTED: &[&str] = &[
    "series",
    "species",
    "news",
    "lens",
    "physics",
    "mathematics",
    "economics",
    "politics",
    "semantics",
    "graphics",
    "linguistics",
];

/// Words this short are never rewritten.
const MIN_WORD_LEN: usize = 4;

/// Minimum number of characters the stem must keep after a rule applies.
const MIN_STEM_LEN: usize = 2;

/// Rule-based noun lemmatizer in the style of WordNet's detachment rules.
///
/// It cannot tell "cookies" from "properties", so it is conservative: short words, protected endings and words
/// containing non-alphabetic characters are left alone.
#[derive(Debug, Clone)]
pub struct SuffixLemmatizer {
    exceptions: AHashMap<String, String>,
}

impl SuffixLemmatizer {
    /// Create a new suffix lemmatizer with the built-in exception list.
    pub fn new() -> Self {
        let mut exceptions = AHashMap::new();
        for (plural, lemma) in IRREGULAR_PLURALS {
            exceptions.insert(plural.to_string(), lemma.to_string());
        }
        for word in UNINFLECTED {
            exceptions.insert(word.to_string(), word.to_string());
        }
        SuffixLemmatizer { exceptions }
    }

    /// Add an exception mapping a surface form to its lemma.
    pub fn with_exception<S: Into<String>>(mut self, word: S, lemma: S) -> Self {
        self.exceptions.insert(word.into(), lemma.into());
        self
    }

    /// Get the listed lemma of an irregular or uninflected word.
    pub fn exception(&self, word: &str) -> Option<&str> {
        self.exceptions.get(word).map(String::as_str)
    }

    fn detach(&self, word: &str) -> String {
        if word.chars().count() < MIN_WORD_LEN {
            return word.to_string();
        }

        if PROTECTED_ENDINGS.iter().any(|ending| word.ends_with(ending)) {
            return word.to_string();
        }

        for (suffix, replacement) in DETACHMENT_RULES {
            if let Some(stem) = word.strip_suffix(suffix)
                && stem.chars().count() >= MIN_STEM_LEN
            {
                return format!("{stem}{replacement}");
            }
        }

        word.to_string()
    }
}

impl Default for SuffixLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for SuffixLemmatizer {
    fn lemmatize(&self, word: &str) -> Result<String> {
        if word.is_empty() {
            return Err(GlossaError::lemmatization("cannot lemmatize an empty word"));
        }

        if let Some(lemma) = self.exceptions.get(word) {
            return Ok(lemma.clone());
        }

        // Phrases and tokens with digits are not inflected nouns.
        if !word.chars().all(|c| c.is_alphabetic()) {
            return Ok(word.to_string());
        }

        Ok(self.detach(word))
    }

    fn name(&self) -> &'static str {
        "suffix"
    }
}

/// Lemmatizer that only accepts base forms a lexicon defines.
///
/// The word itself wins if the lexicon knows it. Otherwise the irregular
/// exception and then each base-form rule are tried, and the first candidate
/// with senses is returned. Words the lexicon cannot place, or a lexicon that
/// fails, fall through to [`SuffixLemmatizer`].
#[derive(Clone)]
pub struct LexiconLemmatizer {
    lexicon: Arc<dyn Lexicon>,
    rules: SuffixLemmatizer,
}

impl fmt::Debug for LexiconLemmatizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconLemmatizer")
            .field("lexicon", &self.lexicon.name())
            .finish()
    }
}

impl LexiconLemmatizer {
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        LexiconLemmatizer {
            lexicon,
            rules: SuffixLemmatizer::new(),
        }
    }

    fn knows(&self, form: &str) -> Result<bool> {
        Ok(!self.lexicon.senses_of(form)?.is_empty())
    }

    /// First candidate base form with senses in the lexicon.
    fn base_form(&self, word: &str) -> Result<Option<String>> {
        if self.knows(word)? {
            return Ok(Some(word.to_string()));
        }

        if let Some(lemma) = self.rules.exception(word)
            && lemma != word
            && self.knows(lemma)?
        {
            return Ok(Some(lemma.to_string()));
        }

        if !word.chars().all(|c| c.is_alphabetic()) {
            return Ok(None);
        }

        for (suffix, replacement) in BASE_FORM_RULES {
            if let Some(stem) = word.strip_suffix(suffix)
                && !stem.is_empty()
            {
                let candidate = format!("{stem}{replacement}");
                if self.knows(&candidate)? {
                    return Ok(Some(candidate));
                }
            }
        }

        Ok(None)
    }
}

impl Lemmatizer for LexiconLemmatizer {
    fn lemmatize(&self, word: &str) -> Result<String> {
        if word.is_empty() {
            return Err(GlossaError::lemmatization("cannot lemmatize an empty word"));
        }

        match self.base_form(word) {
            Ok(Some(lemma)) => return Ok(lemma),
            Ok(None) => {}
            Err(e) => debug!(
                "lexicon '{}' cannot check base forms of '{word}': {e}",
                self.lexicon.name()
            ),
        }

        self.rules.lemmatize(word)
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
