//! Multi-method fuzzy matching with frequency re-ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use ahash::AHashSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{GlossaError, Result};
use crate::spelling::similarity::SimilarityMeasure;

/// Source of per-word access frequencies used to boost candidates.
pub trait FrequencySource {
    /// Get the access frequency of a word; 0 for unknown words.
    fn frequency(&self, word: &str) -> u64;
}

/// Frequency source that knows no words.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFrequencies;

impl FrequencySource for NoFrequencies {
    fn frequency(&self, _word: &str) -> u64 {
        0
    }
}

impl FrequencySource for HashMap<String, u64> {
    fn frequency(&self, word: &str) -> u64 {
        self.get(word).copied().unwrap_or(0)
    }
}

/// A similarity measure and its weight in the combined score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedMeasure {
    pub measure: SimilarityMeasure,
    pub weight: f64,
}

impl WeightedMeasure {
    pub fn new(measure: SimilarityMeasure, weight: f64) -> Self {
        WeightedMeasure { measure, weight }
    }
}

/// Configuration for the fuzzy matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Measures combined into the weighted average.
    pub measures: Vec<WeightedMeasure>,
    /// Candidates must score strictly above this value.
    pub threshold: f64,
    /// Boost added per recorded access of a candidate.
    pub frequency_boost_factor: f64,
    /// Upper bound on the frequency boost.
    pub frequency_boost_cap: f64,
    /// Candidate pools at least this large are scored in parallel.
    pub parallel_threshold: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            measures: vec![
                WeightedMeasure::new(SimilarityMeasure::Ratio, 1.0),
                WeightedMeasure::new(SimilarityMeasure::PartialRatio, 0.9),
                WeightedMeasure::new(SimilarityMeasure::TokenSortRatio, 0.8),
                WeightedMeasure::new(SimilarityMeasure::TokenSetRatio, 0.7),
            ],
            threshold: 60.0,
            frequency_boost_factor: 0.5,
            frequency_boost_cap: 10.0,
            parallel_threshold: 512,
        }
    }
}

impl MatcherConfig {
    /// Check that the weights and thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        if self.measures.is_empty() {
            return Err(GlossaError::invalid_config(
                "matcher needs at least one similarity measure",
            ));
        }
        if self
            .measures
            .iter()
            .any(|m| !m.weight.is_finite() || m.weight < 0.0)
        {
            return Err(GlossaError::invalid_config(
                "measure weights must be finite and non-negative",
            ));
        }
        if self.total_weight() <= 0.0 {
            return Err(GlossaError::invalid_config(
                "measure weights must not sum to zero",
            ));
        }
        if !self.threshold.is_finite() {
            return Err(GlossaError::invalid_config("threshold must be finite"));
        }
        if !self.frequency_boost_factor.is_finite()
            || !self.frequency_boost_cap.is_finite()
            || self.frequency_boost_factor < 0.0
            || self.frequency_boost_cap < 0.0
        {
            return Err(GlossaError::invalid_config(
                "frequency boost settings must be finite and non-negative",
            ));
        }
        Ok(())
    }

    fn total_weight(&self) -> f64 {
        self.measures.iter().map(|m| m.weight).sum()
    }
}

/// A candidate together with its combined score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The candidate as it appeared in the pool.
    pub text: String,
    /// Weighted similarity plus frequency boost; may exceed 100.
    pub score: f64,
}

impl ScoredCandidate {
    pub fn new(text: String, score: f64) -> Self {
        ScoredCandidate { text, score }
    }
}

/// Scores a query against a candidate pool with several similarity measures.
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    config: MatcherConfig,
}

impl FuzzyMatcher {
    /// Create a matcher with the default weights.
    pub fn new() -> Self {
        FuzzyMatcher::default()
    }

    /// Create a matcher with a custom configuration.
    pub fn with_config(config: MatcherConfig) -> Self {
        FuzzyMatcher { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Weighted average of all configured measures, in `[0, 100]`.
    pub fn similarity(&self, query: &str, candidate: &str) -> f64 {
        let total_weight = self.config.total_weight();
        if total_weight <= 0.0 {
            return 0.0;
        }

        let weighted: f64 = self
            .config
            .measures
            .iter()
            .map(|m| m.measure.score(query, candidate) * m.weight)
            .sum();

        weighted / total_weight
    }

    /// Boost granted to a word accessed `frequency` times.
    pub fn frequency_boost(&self, frequency: u64) -> f64 {
        (frequency as f64 * self.config.frequency_boost_factor).min(self.config.frequency_boost_cap)
    }

    /// Score `candidates` against `query`.
    ///
    /// Candidates equal to the query (ignoring case) are skipped, as are
    /// repeated candidates. The result holds only scores strictly above the
    /// threshold, best first; equal scores keep their pool order. At most
    /// `limit` entries are returned.
    pub fn score<S, F>(
        &self,
        query: &str,
        candidates: &[S],
        frequencies: &F,
        limit: usize,
    ) -> Vec<ScoredCandidate>
    where
        S: AsRef<str> + Sync,
        F: FrequencySource + ?Sized,
    {
        if query.is_empty() || candidates.is_empty() || limit == 0 {
            return Vec::new();
        }

        let query = query.to_lowercase();
        let mut seen = AHashSet::new();
        let pool: Vec<(&str, String)> = candidates
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| seen.insert(*c))
            .map(|c| (c, c.to_lowercase()))
            .filter(|(_, lower)| *lower != query)
            .collect();

        let similarities: Vec<f64> = if pool.len() >= self.config.parallel_threshold {
            pool.par_iter()
                .map(|(_, lower)| self.similarity(&query, lower))
                .collect()
        } else {
            pool.iter()
                .map(|(_, lower)| self.similarity(&query, lower))
                .collect()
        };

        let mut scored: Vec<ScoredCandidate> = pool
            .iter()
            .zip(similarities)
            .map(|((text, lower), similarity)| {
                let boost = self.frequency_boost(frequencies.frequency(lower));
                ScoredCandidate::new(text.to_string(), similarity + boost)
            })
            .filter(|candidate| candidate.score > self.config.threshold)
            .collect();

        // Stable sort keeps pool order among equal scores.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(limit);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_typo_is_suggested() {
        let matcher = FuzzyMatcher::new();
        let candidates = pool(&["python", "javascript", "react"]);

        let results = matcher.score("pyhton", &candidates, &NoFrequencies, 5);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "python");
        assert!((results[0].score - 1000.0 / 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_self_suggestion() {
        let matcher = FuzzyMatcher::new();
        let candidates = pool(&["Python", "python", "pythons"]);

        let results = matcher.score("PYTHON", &candidates, &NoFrequencies, 5);

        assert!(results.iter().all(|r| r.text.to_lowercase() != "python"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "pythons");
    }

    #[test]
    fn test_scores_filtered_and_sorted() {
        let matcher = FuzzyMatcher::new();
        let candidates = pool(&[
            "server", "serve", "service", "sever", "observer", "xyz", "browser", "session",
        ]);

        let results = matcher.score("servr", &candidates, &NoFrequencies, 10);

        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.score > 60.0));
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(!results.iter().any(|r| r.text == "xyz"));
    }

    #[test]
    fn test_limit_is_respected() {
        let matcher = FuzzyMatcher::new();
        let candidates = pool(&["pythom", "pythin", "pithon", "pyton", "pythn", "python"]);

        let results = matcher.score("pythox", &candidates, &NoFrequencies, 3);
        assert_eq!(results.len(), 3);

        assert!(matcher.score("pythox", &candidates, &NoFrequencies, 0).is_empty());
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let matcher = FuzzyMatcher::new();

        let results = matcher.score("python", &pool(&["pythom", "pythin"]), &NoFrequencies, 5);
        let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["pythom", "pythin"]);

        let results = matcher.score("python", &pool(&["pythin", "pythom"]), &NoFrequencies, 5);
        let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["pythin", "pythom"]);
    }

    #[test]
    fn test_frequency_boost_reorders() {
        let matcher = FuzzyMatcher::new();
        let mut frequencies: HashMap<String, u64> = HashMap::new();
        frequencies.insert("pythin".to_string(), 4);

        let results = matcher.score("python", &pool(&["pythom", "pythin"]), &frequencies, 5);

        assert_eq!(results[0].text, "pythin");
        assert!((results[0].score - results[1].score - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_frequency_boost_is_capped() {
        let matcher = FuzzyMatcher::new();
        assert_eq!(matcher.frequency_boost(0), 0.0);
        assert_eq!(matcher.frequency_boost(3), 1.5);
        assert_eq!(matcher.frequency_boost(20), 10.0);
        assert_eq!(matcher.frequency_boost(10_000), 10.0);
    }

    #[test]
    fn test_boost_can_lift_over_threshold() {
        let config = MatcherConfig {
            threshold: 90.0,
            ..Default::default()
        };
        let matcher = FuzzyMatcher::with_config(config);
        let candidates = pool(&["pythom"]);

        assert!(matcher.score("python", &candidates, &NoFrequencies, 5).is_empty());

        let mut frequencies: HashMap<String, u64> = HashMap::new();
        frequencies.insert("pythom".to_string(), 100);
        let results = matcher.score("python", &candidates, &frequencies, 5);
        assert_eq!(results.len(), 1);
        assert!(results[0].score > 90.0);
    }

    #[test]
    fn test_duplicate_candidates_collapse() {
        let matcher = FuzzyMatcher::new();
        let results = matcher.score("pyhton", &pool(&["python", "python"]), &NoFrequencies, 5);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_parallel_scoring_matches_sequential() {
        let words: Vec<String> = (0..600).map(|i| format!("word{i}")).collect();
        let sequential = FuzzyMatcher::with_config(MatcherConfig {
            parallel_threshold: usize::MAX,
            ..Default::default()
        });
        let parallel = FuzzyMatcher::with_config(MatcherConfig {
            parallel_threshold: 1,
            ..Default::default()
        });

        assert_eq!(
            sequential.score("word42", &words, &NoFrequencies, 5),
            parallel.score("word42", &words, &NoFrequencies, 5)
        );
    }

    #[test]
    fn test_empty_inputs() {
        let matcher = FuzzyMatcher::new();
        assert!(matcher.score("", &pool(&["a"]), &NoFrequencies, 5).is_empty());
        assert!(matcher.score("a", &Vec::<String>::new(), &NoFrequencies, 5).is_empty());
    }

    #[test]
    fn test_config_validation() {
        assert!(MatcherConfig::default().validate().is_ok());

        let no_measures = MatcherConfig {
            measures: vec![],
            ..Default::default()
        };
        assert!(no_measures.validate().is_err());

        let zero_weights = MatcherConfig {
            measures: vec![WeightedMeasure::new(SimilarityMeasure::Ratio, 0.0)],
            ..Default::default()
        };
        assert!(zero_weights.validate().is_err());

        let bad_threshold = MatcherConfig {
            threshold: f64::NAN,
            ..Default::default()
        };
        assert!(bad_threshold.validate().is_err());
    }
}
