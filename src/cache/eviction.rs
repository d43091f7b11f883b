//! Eviction policies for a bounded definition cache.

use serde::{Deserialize, Serialize};

/// Statistics of a cached word, as seen by an eviction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStats<'a> {
    pub word: &'a str,
    pub access_count: u64,
    /// Insertion sequence number; lower means older.
    pub inserted: u64,
}

/// Chooses which entry leaves a full cache.
pub trait EvictionPolicy: Send + Sync {
    /// Return the index of the entry to evict, or `None` to refuse.
    fn select_victim(&self, entries: &[EntryStats<'_>]) -> Option<usize>;

    /// Get the name of this policy.
    fn name(&self) -> &'static str;
}

/// Evicts the least frequently used entry; the oldest one wins ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct LfuEviction;

impl EvictionPolicy for LfuEviction {
    fn select_victim(&self, entries: &[EntryStats<'_>]) -> Option<usize> {
        entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.access_count, e.inserted))
            .map(|(i, _)| i)
    }

    fn name(&self) -> &'static str {
        "lfu"
    }
}

/// Evicts the oldest entry regardless of use.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoEviction;

impl EvictionPolicy for FifoEviction {
    fn select_victim(&self, entries: &[EntryStats<'_>]) -> Option<usize> {
        entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| e.inserted)
            .map(|(i, _)| i)
    }

    fn name(&self) -> &'static str {
        "fifo"
    }
}

/// Serializable policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionKind {
    #[default]
    Lfu,
    Fifo,
}

impl EvictionKind {
    /// Instantiate the selected policy.
    pub fn policy(&self) -> Box<dyn EvictionPolicy> {
        match self {
            EvictionKind::Lfu => Box::new(LfuEviction),
            EvictionKind::Fifo => Box::new(FifoEviction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> Vec<EntryStats<'static>> {
        vec![
            EntryStats {
                word: "python",
                access_count: 5,
                inserted: 0,
            },
            EntryStats {
                word: "react",
                access_count: 1,
                inserted: 1,
            },
            EntryStats {
                word: "json",
                access_count: 1,
                inserted: 2,
            },
        ]
    }

    #[test]
    fn test_lfu_picks_least_used_then_oldest() {
        let entries = stats();
        assert_eq!(LfuEviction.select_victim(&entries), Some(1));
    }

    #[test]
    fn test_fifo_picks_oldest() {
        let entries = stats();
        assert_eq!(FifoEviction.select_victim(&entries), Some(0));
    }

    #[test]
    fn test_empty_entries() {
        assert_eq!(LfuEviction.select_victim(&[]), None);
        assert_eq!(FifoEviction.select_victim(&[]), None);
    }

    #[test]
    fn test_kind_builds_policy() {
        assert_eq!(EvictionKind::Lfu.policy().name(), "lfu");
        assert_eq!(EvictionKind::Fifo.policy().name(), "fifo");
        assert_eq!(EvictionKind::default(), EvictionKind::Lfu);
    }
}
