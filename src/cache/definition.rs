//! The definition cache.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::cache::eviction::{EntryStats, EvictionKind, EvictionPolicy, LfuEviction};
use crate::error::{GlossaError, Result};
use crate::spelling::matcher::FrequencySource;

/// Configuration for the definition cache.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached words; `None` means unbounded.
    pub capacity: Option<usize>,
    /// Policy applied when a bounded cache is full.
    pub eviction: EvictionKind,
}

impl CacheConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == Some(0) {
            return Err(GlossaError::invalid_config(
                "cache capacity must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Snapshot of a cached word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionEntry {
    pub word: String,
    pub meaning: String,
    pub access_count: u64,
}

#[derive(Debug)]
struct Slot {
    meaning: String,
    access_count: AtomicU64,
    inserted: u64,
}

/// Thread-safe map from normalized word to definition, with access counters.
///
/// Each operation holds the lock only for its own duration. Counters are
/// atomics bumped under the read lock, so concurrent hits never lose updates.
/// Counters only grow while their entry is resident.
pub struct DefinitionCache {
    entries: RwLock<AHashMap<String, Slot>>,
    capacity: Option<usize>,
    policy: Box<dyn EvictionPolicy>,
    next_sequence: AtomicU64,
    evictions: AtomicU64,
}

impl fmt::Debug for DefinitionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("policy", &self.policy.name())
            .finish()
    }
}

impl DefinitionCache {
    /// Create an unbounded cache.
    pub fn new() -> Self {
        DefinitionCache::with_policy(None, Box::new(LfuEviction))
    }

    /// Create a bounded cache that evicts the least frequently used word.
    pub fn with_capacity(capacity: usize) -> Self {
        DefinitionCache::with_policy(Some(capacity), Box::new(LfuEviction))
    }

    /// Create a cache with an explicit capacity and eviction policy.
    pub fn with_policy(capacity: Option<usize>, policy: Box<dyn EvictionPolicy>) -> Self {
        DefinitionCache {
            entries: RwLock::new(AHashMap::new()),
            capacity,
            policy,
            next_sequence: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Create a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(DefinitionCache::with_policy(
            config.capacity,
            config.eviction.policy(),
        ))
    }

    /// Look up a word, counting the access on a hit.
    pub fn get(&self, word: &str) -> Option<String> {
        let guard = self.entries.read();
        let slot = guard.get(word)?;
        slot.access_count.fetch_add(1, Ordering::Relaxed);
        Some(slot.meaning.clone())
    }

    /// Look up a word without counting the access.
    pub fn peek(&self, word: &str) -> Option<String> {
        self.entries.read().get(word).map(|slot| slot.meaning.clone())
    }

    /// Count an access to a cached word. Returns false if the word is absent.
    pub fn record_access(&self, word: &str) -> bool {
        match self.entries.read().get(word) {
            Some(slot) => {
                slot.access_count.fetch_add(1, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Insert or overwrite a definition. The access count of an existing word
    /// is kept.
    pub fn put(&self, word: &str, meaning: &str) -> Result<()> {
        if word.is_empty() {
            return Err(GlossaError::cache("cannot cache an empty word"));
        }
        if meaning.trim().is_empty() {
            return Err(GlossaError::cache(format!(
                "refusing empty meaning for '{word}'"
            )));
        }

        let mut guard = self.entries.write();

        if let Some(slot) = guard.get_mut(word) {
            slot.meaning = meaning.to_string();
            return Ok(());
        }

        if let Some(capacity) = self.capacity
            && guard.len() >= capacity
        {
            let victim = {
                let stats: Vec<EntryStats<'_>> = guard
                    .iter()
                    .map(|(w, slot)| EntryStats {
                        word: w,
                        access_count: slot.access_count.load(Ordering::Relaxed),
                        inserted: slot.inserted,
                    })
                    .collect();
                self.policy
                    .select_victim(&stats)
                    .and_then(|i| stats.get(i))
                    .map(|e| e.word.to_string())
            };

            match victim {
                Some(victim) => {
                    guard.remove(&victim);
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        "evicted '{victim}' ({} policy) to make room for '{word}'",
                        self.policy.name()
                    );
                }
                None => {
                    return Err(GlossaError::cache(format!(
                        "cache is full ({capacity} words) and the {} policy chose no victim",
                        self.policy.name()
                    )));
                }
            }
        }

        guard.insert(
            word.to_string(),
            Slot {
                meaning: meaning.to_string(),
                access_count: AtomicU64::new(0),
                inserted: self.next_sequence.fetch_add(1, Ordering::Relaxed),
            },
        );
        Ok(())
    }

    /// Get the access count of a word; 0 for unknown words.
    pub fn frequency(&self, word: &str) -> u64 {
        self.entries
            .read()
            .get(word)
            .map(|slot| slot.access_count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Check if a word is cached.
    pub fn contains(&self, word: &str) -> bool {
        self.entries.read().contains_key(word)
    }

    /// Snapshot of all cached words, oldest first.
    pub fn all_words(&self) -> Vec<String> {
        let guard = self.entries.read();
        let mut words: Vec<(u64, &String)> =
            guard.iter().map(|(w, slot)| (slot.inserted, w)).collect();
        words.sort_unstable_by_key(|(inserted, _)| *inserted);
        words.into_iter().map(|(_, w)| w.clone()).collect()
    }

    /// Snapshot of a single entry.
    pub fn entry(&self, word: &str) -> Option<DefinitionEntry> {
        self.entries.read().get(word).map(|slot| DefinitionEntry {
            word: word.to_string(),
            meaning: slot.meaning.clone(),
            access_count: slot.access_count.load(Ordering::Relaxed),
        })
    }

    /// Get the most frequently accessed words, most used first.
    pub fn most_frequent(&self, limit: usize) -> Vec<DefinitionEntry> {
        let guard = self.entries.read();
        let mut entries: Vec<(u64, DefinitionEntry)> = guard
            .iter()
            .map(|(word, slot)| {
                (
                    slot.inserted,
                    DefinitionEntry {
                        word: word.clone(),
                        meaning: slot.meaning.clone(),
                        access_count: slot.access_count.load(Ordering::Relaxed),
                    },
                )
            })
            .collect();

        entries.sort_by(|a, b| {
            b.1.access_count
                .cmp(&a.1.access_count)
                .then(a.0.cmp(&b.0))
        });
        entries.truncate(limit);
        entries.into_iter().map(|(_, entry)| entry).collect()
    }

    /// Get the number of cached words.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Get the configured capacity.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Get the name of the eviction policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Get the number of evicted words so far.
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Get the sum of all resident access counters.
    pub fn total_accesses(&self) -> u64 {
        self.entries
            .read()
            .values()
            .map(|slot| slot.access_count.load(Ordering::Relaxed))
            .sum()
    }
}

impl Default for DefinitionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencySource for DefinitionCache {
    fn frequency(&self, word: &str) -> u64 {
        DefinitionCache::frequency(self, word)
    }
}
