//! In-memory mood cache keyed by exact text.
//!
//! # Invariants
//! - Keys are compared byte-for-byte; no trimming or case folding.
//! - All access goes through one mutex; no lock is held across `.await`.
//! - Unbounded unless a capacity is given, in which case the least
//!   recently used entry is evicted first.

use crate::model::mood::Mood;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

/// Process-lifetime text → mood cache.
pub struct MoodCache {
    entries: Mutex<LruCache<String, Mood>>,
}

impl MoodCache {
    /// Creates an unbounded cache.
    pub fn unbounded() -> Self {
        Self {
            entries: Mutex::new(LruCache::unbounded()),
        }
    }

    /// Creates a cache holding at most `capacity` entries.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, text: &str) -> Option<Mood> {
        self.entries.lock().get(text).copied()
    }

    pub fn put(&self, text: &str, mood: Mood) {
        self.entries.lock().put(text.to_string(), mood);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for MoodCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
