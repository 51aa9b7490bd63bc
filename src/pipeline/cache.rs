//! ResultCache - bounded in-memory cache of converted sequences.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use super::frames::SourceId;
use crate::ascii::{ConversionConfig, ConversionResult};

/// Default number of sequences kept.
pub const DEFAULT_CACHE_CAPACITY: usize = 5;

/// Cache key: which source, converted how.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source: SourceId,
    pub config: ConversionConfig,
}

impl CacheKey {
    pub fn new(source: SourceId, config: ConversionConfig) -> Self {
        Self { source, config }
    }
}

/// One converted frame and its playback delay.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedFrame {
    pub result: ConversionResult,
    pub delay: Duration,
}

/// Converted frames of a whole sequence, shared between the cache and callers.
pub type ConvertedSequence = Arc<Vec<ConvertedFrame>>;

/// Bounded cache with insertion-order eviction.
///
/// Lookups do not refresh an entry: once full, the entry inserted longest
/// ago is dropped, however recently it was read.
#[derive(Debug)]
pub struct ResultCache {
    capacity: usize,
    entries: VecDeque<(CacheKey, ConvertedSequence)>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl ResultCache {
    /// Create a cache holding at most `capacity` sequences (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cached frames for `key`, if present.
    pub fn get(&self, key: &CacheKey) -> Option<ConvertedSequence> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, frames)| Arc::clone(frames))
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Store frames for `key` as the newest entry.
    ///
    /// An existing entry for the same key is replaced. Returns the key that
    /// was evicted to make room, if any.
    pub fn insert(&mut self, key: CacheKey, frames: ConvertedSequence) -> Option<CacheKey> {
        self.entries.retain(|(k, _)| k != &key);

        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front().map(|(k, _)| k)
        } else {
            None
        };

        self.entries.push_back((key, frames));
        evicted
    }

    /// Keys from oldest to newest insertion.
    pub fn keys(&self) -> impl Iterator<Item = &CacheKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Remove all entries. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::{CharSet, PixelBuffer};
    use crate::pipeline::frames::FrameSequence;

    fn key(seed: u8) -> CacheKey {
        let source = FrameSequence::still(PixelBuffer::filled(1, 1, [seed, 0, 0, 255]).unwrap());
        CacheKey::new(source.id().clone(), ConversionConfig::default())
    }

    fn frames(text: &str) -> ConvertedSequence {
        Arc::new(vec![ConvertedFrame {
            result: ConversionResult {
                text: text.to_string(),
                columns: 1,
                rows: 1,
                raster: None,
            },
            delay: Duration::ZERO,
        }])
    }

    #[test]
    fn test_get_returns_none_for_missing() {
        let cache = ResultCache::default();
        assert!(cache.get(&key(1)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = ResultCache::default();
        assert_eq!(cache.insert(key(1), frames("a")), None);
        let hit = cache.get(&key(1)).unwrap();
        assert_eq!(hit[0].result.text, "a");
    }

    #[test]
    fn test_config_is_part_of_key() {
        let mut cache = ResultCache::default();
        cache.insert(key(1), frames("a"));
        let mut other = key(1);
        other.config.format = CharSet::Blocks;
        assert!(cache.get(&other).is_none());
    }

    #[test]
    fn test_sixth_insert_evicts_first() {
        let mut cache = ResultCache::new(5);
        for seed in 0..5 {
            assert_eq!(cache.insert(key(seed), frames("x")), None);
        }
        assert_eq!(cache.insert(key(5), frames("x")), Some(key(0)));
        assert_eq!(cache.len(), 5);
        assert!(!cache.contains(&key(0)));
        assert!((1..=5).all(|s| cache.contains(&key(s))));
    }

    #[test]
    fn test_reads_do_not_refresh_entries() {
        let mut cache = ResultCache::new(2);
        cache.insert(key(0), frames("old"));
        cache.insert(key(1), frames("new"));
        // Reading the oldest entry must not save it from eviction.
        assert!(cache.get(&key(0)).is_some());
        assert_eq!(cache.insert(key(2), frames("newest")), Some(key(0)));
    }

    #[test]
    fn test_reinsert_replaces_and_moves_to_newest() {
        let mut cache = ResultCache::new(2);
        cache.insert(key(0), frames("a"));
        cache.insert(key(1), frames("b"));
        assert_eq!(cache.insert(key(0), frames("c")), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&key(0)).unwrap()[0].result.text, "c");
        let order: Vec<_> = cache.keys().cloned().collect();
        assert_eq!(order, vec![key(1), key(0)]);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut cache = ResultCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert(key(0), frames("a"));
        assert_eq!(cache.insert(key(1), frames("b")), Some(key(0)));
    }

    #[test]
    fn test_clear() {
        let mut cache = ResultCache::default();
        cache.insert(key(0), frames("a"));
        cache.insert(key(1), frames("b"));
        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
    }
}
