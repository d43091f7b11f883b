//! Spelling and phonetic variant generation.
//!
//! Variants are produced lazily, in a fixed priority order, and generation
//! stops as soon as the configured number of distinct variants has been
//! emitted. None of them is checked for being a real word here; the lookup
//! pipeline decides that against the cache and the lexicon.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Single-character (and `ph` digraph) phonetic equivalences.
///
/// Each entry maps a pattern to the replacements tried at every position
/// where the pattern occurs, in the listed order.
pub const PHONETIC_SUBSTITUTIONS: &[(&str, &[&str])] = &[
    ("ph", &["f"]),
    ("f", &["ph"]),
    ("c", &["k", "s"]),
    ("k", &["c"]),
    ("s", &["z", "c"]),
    ("z", &["s"]),
    ("g", &["j"]),
    ("j", &["g"]),
    ("i", &["y"]),
    ("y", &["i"]),
];

/// Configuration for variant generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationConfig {
    /// Maximum number of variants produced per word.
    pub max_variations: usize,
    /// Letters tried by the insertion pass.
    pub alphabet: Vec<char>,
}

impl Default for VariationConfig {
    fn default() -> Self {
        VariationConfig {
            max_variations: 10,
            alphabet: ('a'..='z').collect(),
        }
    }
}

/// Generator of typo and phonetic variants.
#[derive(Debug, Clone, Default)]
pub struct VariationGenerator {
    config: VariationConfig,
}

impl VariationGenerator {
    /// Create a generator with the default configuration.
    pub fn new() -> Self {
        VariationGenerator::default()
    }

    /// Create a generator with a custom configuration.
    pub fn with_config(config: VariationConfig) -> Self {
        VariationGenerator { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &VariationConfig {
        &self.config
    }

    /// Lazily iterate over the variants of `word`.
    pub fn variations(&self, word: &str) -> Variations {
        Variations::new(word, &self.config)
    }

    /// Collect the variants of `word` into a vector.
    pub fn generate(&self, word: &str) -> Vec<String> {
        self.variations(word).collect()
    }
}

/// Lazily iterate over the variants of `word` using the default configuration.
pub fn variations(word: &str) -> Variations {
    Variations::new(word, &VariationConfig::default())
}

/// Generate at most ten variants of `word`: doubled-letter removals,
/// single-letter insertions, adjacent transpositions, then phonetic
/// substitutions.
pub fn generate_variations(word: &str) -> Vec<String> {
    variations(word).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    DoubledLetters,
    Insertions,
    Transpositions,
    Phonetic,
    Done,
}

/// Iterator over the variants of a single word.
///
/// Duplicates and the word itself are skipped; they do not count toward the
/// limit.
#[derive(Debug, Clone)]
pub struct Variations {
    chars: Vec<char>,
    alphabet: Vec<char>,
    limit: usize,
    stage: Stage,
    position: usize,
    cursor: usize,
    replacement: usize,
    seen: AHashSet<String>,
    emitted: usize,
}

impl Variations {
    fn new(word: &str, config: &VariationConfig) -> Self {
        let mut seen = AHashSet::new();
        seen.insert(word.to_string());

        Variations {
            chars: word.chars().collect(),
            alphabet: config.alphabet.clone(),
            limit: config.max_variations,
            stage: Stage::DoubledLetters,
            position: 0,
            cursor: 0,
            replacement: 0,
            seen,
            emitted: 0,
        }
    }

    fn enter(&mut self, stage: Stage) {
        self.stage = stage;
        self.position = 0;
        self.cursor = 0;
        self.replacement = 0;
    }

    fn without(&self, index: usize) -> String {
        self.chars
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, c)| c)
            .collect()
    }

    fn with_inserted(&self, index: usize, ch: char) -> String {
        let mut chars = self.chars.clone();
        chars.insert(index, ch);
        chars.into_iter().collect()
    }

    fn with_swapped(&self, index: usize) -> String {
        let mut chars = self.chars.clone();
        chars.swap(index, index + 1);
        chars.into_iter().collect()
    }

    fn matches_at(&self, index: usize, pattern: &str) -> bool {
        let mut offset = index;
        for p in pattern.chars() {
            if self.chars.get(offset) != Some(&p) {
                return false;
            }
            offset += 1;
        }
        true
    }

    fn with_replaced(&self, index: usize, width: usize, replacement: &str) -> String {
        let mut out = String::with_capacity(self.chars.len() + replacement.len());
        out.extend(&self.chars[..index]);
        out.push_str(replacement);
        out.extend(&self.chars[index + width..]);
        out
    }

    /// Produce the next raw candidate, possibly a duplicate.
    fn next_candidate(&mut self) -> Option<String> {
        loop {
            match self.stage {
                Stage::DoubledLetters => {
                    if self.position + 1 >= self.chars.len() {
                        self.enter(Stage::Insertions);
                        continue;
                    }
                    let i = self.position;
                    self.position += 1;
                    if self.chars[i] == self.chars[i + 1] {
                        return Some(self.without(i + 1));
                    }
                }
                Stage::Insertions => {
                    if self.position > self.chars.len() {
                        self.enter(Stage::Transpositions);
                        continue;
                    }
                    if self.cursor >= self.alphabet.len() {
                        self.position += 1;
                        self.cursor = 0;
                        continue;
                    }
                    let ch = self.alphabet[self.cursor];
                    self.cursor += 1;
                    return Some(self.with_inserted(self.position, ch));
                }
                Stage::Transpositions => {
                    if self.position + 1 >= self.chars.len() {
                        self.enter(Stage::Phonetic);
                        continue;
                    }
                    let i = self.position;
                    self.position += 1;
                    return Some(self.with_swapped(i));
                }
                Stage::Phonetic => {
                    if self.position >= self.chars.len() {
                        self.stage = Stage::Done;
                        continue;
                    }
                    if self.cursor >= PHONETIC_SUBSTITUTIONS.len() {
                        self.position += 1;
                        self.cursor = 0;
                        self.replacement = 0;
                        continue;
                    }
                    let (pattern, replacements) = PHONETIC_SUBSTITUTIONS[self.cursor];
                    if self.replacement >= replacements.len()
                        || !self.matches_at(self.position, pattern)
                    {
                        self.cursor += 1;
                        self.replacement = 0;
                        continue;
                    }
                    let replacement = replacements[self.replacement];
                    self.replacement += 1;
                    let width = pattern.chars().count();
                    return Some(self.with_replaced(self.position, width, replacement));
                }
                Stage::Done => return None,
            }
        }
    }
}

impl Iterator for Variations {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.emitted >= self.limit {
            return None;
        }

        while let Some(candidate) = self.next_candidate() {
            if self.seen.insert(candidate.clone()) {
                self.emitted += 1;
                return Some(candidate);
            }
        }

        None
    }
}
