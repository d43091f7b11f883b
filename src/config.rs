//! Engine configuration.
//!
//! Every tunable of the lookup pipeline lives here, grouped per component.
//! All sections deserialize with defaults, so a configuration file only needs
//! the keys it overrides.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::CacheConfig;
use crate::error::{GlossaError, Result};
use crate::lexicon::SEED_WORDS;
use crate::spelling::{MatcherConfig, VariationConfig};

/// Limits and formatting used by the lookup orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Upper bound on returned suggestions.
    pub max_suggestions: usize,
    /// Below this many suggestions the lexicon and variant fallbacks run.
    pub min_suggestions: usize,
    /// Suggestions taken from fuzzy matching against cached words.
    pub cache_fuzzy_limit: usize,
    /// Suggestions taken from fuzzy matching against lexicon relatives.
    pub lexicon_fuzzy_limit: usize,
    /// Senses whose definitions make up a meaning.
    pub max_senses: usize,
    /// Broader and narrower senses consulted per sense.
    pub related_senses: usize,
    /// Joins the definitions of a meaning.
    pub definition_separator: String,
    /// The word list is padded from the lexicon below this many cached words.
    pub word_list_padding_threshold: usize,
    /// Lexicon senses consulted when padding the word list.
    pub word_list_padding_senses: usize,
    /// Upper bound on the word list.
    pub word_list_limit: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            max_suggestions: 5,
            min_suggestions: 3,
            cache_fuzzy_limit: 5,
            lexicon_fuzzy_limit: 3,
            max_senses: 3,
            related_senses: 2,
            definition_separator: "; ".to_string(),
            word_list_padding_threshold: 20,
            word_list_padding_senses: 50,
            word_list_limit: 1000,
        }
    }
}

impl LookupConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_suggestions == 0 {
            return Err(GlossaError::invalid_config(
                "max_suggestions must be at least 1",
            ));
        }
        if self.min_suggestions > self.max_suggestions {
            return Err(GlossaError::invalid_config(format!(
                "min_suggestions ({}) exceeds max_suggestions ({})",
                self.min_suggestions, self.max_suggestions
            )));
        }
        if self.max_senses == 0 {
            return Err(GlossaError::invalid_config("max_senses must be at least 1"));
        }
        Ok(())
    }
}

/// Complete configuration of a [`LookupEngine`](crate::engine::LookupEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub matcher: MatcherConfig,
    pub variations: VariationConfig,
    pub cache: CacheConfig,
    pub lookup: LookupConfig,
    /// Words resolved into the cache by [`LookupEngine::seed`](crate::engine::LookupEngine::seed).
    pub seed_words: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            matcher: MatcherConfig::default(),
            variations: VariationConfig::default(),
            cache: CacheConfig::default(),
            lookup: LookupConfig::default(),
            seed_words: SEED_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: EngineConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.matcher.validate()?;
        self.cache.validate()?;
        self.lookup.validate()?;
        Ok(())
    }
}
