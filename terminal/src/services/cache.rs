//! # Quote Cache
//!
//! A small TTL map. Entries are served until they are older than the TTL and
//! are dropped lazily on the next lookup.
//!
//! ```rust
//! use std::time::Duration;
//! use stocksim::services::cache::TtlCache;
//!
//! let cache = TtlCache::new(Duration::from_secs(5));
//! cache.insert("ACME", 101.5);
//! assert_eq!(cache.get("ACME"), Some(101.5));
//! ```

use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct CachedEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// Thread-safe string-keyed cache with one TTL for every entry.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CachedEntry<V>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Clone of the value under `key` if it has not expired.
    pub fn get(&self, key: &str) -> Option<V> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }
        // Expired: drop it so the map does not grow with dead symbols. Another
        // thread may have refreshed the entry since the read lock was released.
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.entries.write().insert(
            key.into(),
            CachedEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.write().remove(key);
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
