//! The lookup orchestrator.
//!
//! A query walks through a fixed sequence of strategies and stops at the
//! first one that yields a definition:
//!
//! 1. the cache, keyed by the lowercased query;
//! 2. the cache, keyed by the normalized query;
//! 3. the lexicon, for the query and then its normalized form;
//! 4. the cache and the lexicon, for each spelling variant.
//!
//! When none resolves, suggestions are gathered from fuzzy matching against
//! the cached words, then against lexicon relatives of the query, and finally
//! from spelling variants that resolve to a definition.

use std::sync::Arc;

use ahash::AHashSet;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::cache::DefinitionCache;
use crate::config::{EngineConfig, LookupConfig};
use crate::engine::result::SearchResult;
use crate::error::{GlossaError, Result};
use crate::lexicon::{Lexicon, Sense};
use crate::normalize::{LexiconLemmatizer, Normalizer};
use crate::spelling::{FuzzyMatcher, ScoredCandidate, VariationGenerator};

/// Summary of a [`LookupEngine::seed`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    /// Words newly resolved into the cache.
    pub resolved: usize,
    /// Words already cached.
    pub skipped: usize,
    /// Words the lexicon could not define.
    pub unresolved: Vec<String>,
}

/// Point-in-time engine statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub cached_words: usize,
    pub capacity: Option<usize>,
    pub total_accesses: u64,
    pub evictions: u64,
    pub eviction_policy: String,
    pub lexicon: String,
    pub lemmatizer: String,
}

/// Resolves words to definitions, falling back to ranked suggestions.
///
/// The engine is `Send + Sync`; concurrent lookups share the cache, whose
/// lock is never held across a lexicon call.
pub struct LookupEngine {
    lexicon: Arc<dyn Lexicon>,
    cache: Arc<DefinitionCache>,
    normalizer: Normalizer,
    variations: VariationGenerator,
    matcher: FuzzyMatcher,
    config: LookupConfig,
    seed_words: Vec<String>,
}

impl std::fmt::Debug for LookupEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupEngine")
            .field("lexicon", &self.lexicon.name())
            .field("cache", &self.cache)
            .field("normalizer", &self.normalizer)
            .field("config", &self.config)
            .finish()
    }
}

impl LookupEngine {
    /// Create an engine with the default configuration.
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Result<Self> {
        LookupEngine::from_config(EngineConfig::default(), lexicon)
    }

    /// Create an engine from a configuration.
    ///
    /// Words are lemmatized against `lexicon`, so a plural maps to the
    /// singular the lexicon actually defines.
    pub fn from_config(config: EngineConfig, lexicon: Arc<dyn Lexicon>) -> Result<Self> {
        config.validate()?;
        let cache = DefinitionCache::from_config(&config.cache)?;
        let lemmatizer = LexiconLemmatizer::new(Arc::clone(&lexicon));

        Ok(LookupEngine {
            lexicon,
            cache: Arc::new(cache),
            normalizer: Normalizer::with_lemmatizer(Arc::new(lemmatizer)),
            variations: VariationGenerator::with_config(config.variations),
            matcher: FuzzyMatcher::with_config(config.matcher),
            config: config.lookup,
            seed_words: config.seed_words,
        })
    }

    /// Replace the normalizer.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Share an existing cache.
    pub fn with_cache(mut self, cache: Arc<DefinitionCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &Arc<DefinitionCache> {
        &self.cache
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn matcher(&self) -> &FuzzyMatcher {
        &self.matcher
    }

    pub fn variations(&self) -> &VariationGenerator {
        &self.variations
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Get the access count of a cached word.
    pub fn frequency(&self, word: &str) -> u64 {
        self.cache.frequency(word)
    }

    /// Look up a word.
    ///
    /// Never fails: lexicon errors are logged and the affected step is
    /// skipped. An input that normalizes to nothing yields empty suggestions
    /// without touching the cache or the lexicon.
    pub fn lookup(&self, word: &str) -> SearchResult {
        let key = word.trim().to_lowercase();
        let normalized = self.normalizer.normalize(word);
        if normalized.is_empty() {
            debug!("'{word}' normalizes to nothing");
            return SearchResult::none();
        }

        if let Some(meaning) = self.cache.get(&key) {
            debug!("'{key}' served from cache");
            return SearchResult::exact(key, meaning);
        }

        if normalized != key
            && let Some(meaning) = self.cache.get(&normalized)
        {
            debug!("'{key}' served from cache as '{normalized}'");
            return SearchResult::normalized(normalized, meaning, key);
        }

        let senses = self.senses_for(&key, &normalized);
        if let Some(meaning) = self.meaning_of(&senses) {
            debug!("'{key}' resolved by lexicon '{}'", self.lexicon.name());
            self.store(&key, &normalized, &meaning);
            return SearchResult::exact(key, meaning);
        }

        let variants = self.variations.generate(&normalized);
        if let Some((variant, meaning)) = self.resolve_variant(&variants) {
            debug!("'{key}' resolved through variant '{variant}'");
            return SearchResult::normalized(variant, meaning, key);
        }

        let suggestions = self.suggest(&key, &senses, &variants);
        debug!("'{key}' unresolved, {} suggestion(s)", suggestions.len());
        SearchResult::Suggestions { suggestions }
    }

    /// Resolve the configured seed words.
    pub fn initialize(&self) -> Result<SeedReport> {
        self.seed(&self.seed_words)
    }

    /// Resolve `words` into the cache.
    ///
    /// Words already cached are skipped, so seeding twice is harmless. Fails
    /// only when every attempted lexicon call failed.
    pub fn seed<S: AsRef<str>>(&self, words: &[S]) -> Result<SeedReport> {
        let mut report = SeedReport::default();
        let mut attempted = 0;
        let mut failures = 0;
        let mut last_error = None;

        for word in words {
            let key = word.as_ref().trim().to_lowercase();
            let normalized = self.normalizer.normalize(&key);
            if normalized.is_empty() {
                continue;
            }
            if self.cache.contains(&key) {
                report.skipped += 1;
                continue;
            }

            attempted += 1;
            let senses = match self.fetch_senses(&key, &normalized) {
                Ok(senses) => senses,
                Err(e) => {
                    warn!("seeding '{key}' failed: {e}");
                    failures += 1;
                    last_error = Some(e);
                    report.unresolved.push(key);
                    continue;
                }
            };

            match self.meaning_of(&senses) {
                Some(meaning) => {
                    self.store(&key, &normalized, &meaning);
                    report.resolved += 1;
                }
                None => report.unresolved.push(key),
            }
        }

        if attempted > 0
            && failures == attempted
            && let Some(e) = last_error
        {
            return Err(GlossaError::lexicon(format!(
                "seeding failed for all {attempted} word(s): {e}"
            )));
        }

        info!(
            "seeded {} word(s), {} already cached, {} unresolved",
            report.resolved,
            report.skipped,
            report.unresolved.len()
        );
        Ok(report)
    }

    /// Snapshot of known words for client-side filtering.
    ///
    /// A sparse cache is padded with the first lemma of the first lexicon
    /// senses.
    pub fn word_list(&self) -> Vec<String> {
        let mut words = self.cache.all_words();

        if words.len() < self.config.word_list_padding_threshold {
            match self.lexicon.all_senses() {
                Ok(senses) => words.extend(
                    senses
                        .take(self.config.word_list_padding_senses)
                        .filter_map(|sense| sense.lemmas.into_iter().next()),
                ),
                Err(e) => warn!("cannot pad word list from '{}': {e}", self.lexicon.name()),
            }
            let mut seen = AHashSet::new();
            words.retain(|w| seen.insert(w.clone()));
        }

        words.truncate(self.config.word_list_limit);
        words
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            cached_words: self.cache.len(),
            capacity: self.cache.capacity(),
            total_accesses: self.cache.total_accesses(),
            evictions: self.cache.evictions(),
            eviction_policy: self.cache.policy_name().to_string(),
            lexicon: self.lexicon.name().to_string(),
            lemmatizer: self.normalizer.lemmatizer_name().to_string(),
        }
    }

    /// Senses of `key`, else of `normalized`.
    fn fetch_senses(&self, key: &str, normalized: &str) -> Result<Vec<Sense>> {
        let senses = self.lexicon.senses_of(key)?;
        if senses.is_empty() && normalized != key {
            return self.lexicon.senses_of(normalized);
        }
        Ok(senses)
    }

    fn senses_for(&self, key: &str, normalized: &str) -> Vec<Sense> {
        self.fetch_senses(key, normalized).unwrap_or_else(|e| {
            warn!("lexicon '{}' failed for '{key}': {e}", self.lexicon.name());
            Vec::new()
        })
    }

    /// Join the distinct definitions of the leading senses.
    fn meaning_of(&self, senses: &[Sense]) -> Option<String> {
        let mut definitions: Vec<&str> = Vec::new();
        for sense in senses.iter().take(self.config.max_senses) {
            let definition = sense.definition.trim();
            if !definition.is_empty() && !definitions.contains(&definition) {
                definitions.push(definition);
            }
        }

        if definitions.is_empty() {
            None
        } else {
            Some(definitions.join(&self.config.definition_separator))
        }
    }

    /// Cache a lexicon resolution and count it as the first access.
    fn store(&self, key: &str, normalized: &str, meaning: &str) {
        if let Err(e) = self.cache.put(key, meaning) {
            warn!("cannot cache '{key}': {e}");
            return;
        }
        // Counted before the second insert so a bounded LFU cache keeps it.
        self.cache.record_access(key);
        if normalized != key
            && let Err(e) = self.cache.put(normalized, meaning)
        {
            warn!("cannot cache '{normalized}': {e}");
        }
    }

    /// First variant found in the cache or, failing that, in the lexicon.
    fn resolve_variant(&self, variants: &[String]) -> Option<(String, String)> {
        for variant in variants {
            if let Some(meaning) = self.cache.peek(variant) {
                return Some((variant.clone(), meaning));
            }
            let senses = match self.lexicon.senses_of(variant) {
                Ok(senses) => senses,
                Err(e) => {
                    warn!("lexicon '{}' failed for variant '{variant}': {e}", self.lexicon.name());
                    continue;
                }
            };
            if let Some(meaning) = self.meaning_of(&senses) {
                self.store(variant, variant, &meaning);
                return Some((variant.clone(), meaning));
            }
        }
        None
    }

    /// Resolve a variant without suggestions, returning the word that
    /// carries the meaning. Only that word is cached.
    fn resolve(&self, word: &str) -> Option<String> {
        let normalized = self.normalizer.normalize(word);
        if normalized.is_empty() {
            return None;
        }
        if self.cache.get(word).is_some() {
            return Some(word.to_string());
        }
        if normalized != word && self.cache.get(&normalized).is_some() {
            return Some(normalized);
        }

        let mut forms = vec![word];
        if normalized != word {
            forms.push(&normalized);
        }
        for form in forms {
            let senses = match self.lexicon.senses_of(form) {
                Ok(senses) => senses,
                Err(e) => {
                    warn!("lexicon '{}' failed for variant '{form}': {e}", self.lexicon.name());
                    continue;
                }
            };
            if let Some(meaning) = self.meaning_of(&senses) {
                self.store(form, form, &meaning);
                return Some(form.to_string());
            }
        }
        None
    }

    fn suggest(&self, key: &str, senses: &[Sense], variants: &[String]) -> Vec<String> {
        let max = self.config.max_suggestions;
        let min = self.config.min_suggestions;

        let cache: &DefinitionCache = &self.cache;
        let pool = cache.all_words();
        let mut suggestions: Vec<String> = self
            .matcher
            .score(key, &pool, cache, self.config.cache_fuzzy_limit)
            .into_iter()
            .map(|c| c.text)
            .collect();

        if suggestions.len() < min {
            let related = self.related_words(senses);
            for ScoredCandidate { text, .. } in
                self.matcher
                    .score(key, &related, cache, self.config.lexicon_fuzzy_limit)
            {
                if !suggestions.contains(&text) {
                    suggestions.push(text);
                }
            }
        }

        if suggestions.len() < min {
            for variant in variants {
                if suggestions.len() >= max {
                    break;
                }
                if let Some(word) = self.resolve(variant)
                    && !suggestions.contains(&word)
                {
                    suggestions.push(word);
                }
            }
        }

        suggestions.truncate(max);
        suggestions
    }

    /// Single-word lemmas of `senses` and of their nearest relatives.
    fn related_words(&self, senses: &[Sense]) -> Vec<String> {
        let limit = self.config.related_senses;
        let mut related: Vec<Sense> = Vec::new();

        for sense in senses {
            related.push(sense.clone());
            match self.lexicon.broader(sense) {
                Ok(broader) => related.extend(broader.into_iter().take(limit)),
                Err(e) => warn!("broader senses of '{}' unavailable: {e}", sense.id),
            }
            match self.lexicon.narrower(sense) {
                Ok(narrower) => related.extend(narrower.into_iter().take(limit)),
                Err(e) => warn!("narrower senses of '{}' unavailable: {e}", sense.id),
            }
        }

        let mut seen = AHashSet::new();
        related
            .iter()
            .flat_map(|sense| sense.lemmas.iter())
            .map(|lemma| lemma.to_lowercase())
            .filter(|lemma| !lemma.is_empty() && !lemma.contains(['_', ' ']))
            .filter(|lemma| seen.insert(lemma.clone()))
            .collect()
    }
}
