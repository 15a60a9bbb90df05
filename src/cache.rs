use std::hash::Hash;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// In-memory query-result cache with a fixed time-to-live. Entries are keyed
/// by (operation, parameters); expired entries are evicted on read. The
/// manual refresh action is `invalidate_all` followed by a normal re-fetch.
pub struct TtlCache<K, V> {
    entries: DashMap<K, Entry<V>>,
    ttl: Duration,
}

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value if present and fresh; a stale entry is
    /// removed and reported as a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                return Some(entry.value.clone());
            }
            Some(_) => {}
            None => return None,
        }
        // read guard dropped above; safe to evict the stale entry
        self.entries.remove(key);
        None
    }

    pub fn put(&self, key: K, value: V) {
        self.entries.insert(
            key,
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn invalidate_all(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_ttl() {
        let cache: TtlCache<&str, i32> = TtlCache::new(Duration::from_secs(60));
        cache.put("k", 7);
        assert_eq!(cache.get(&"k"), Some(7));
    }

    #[test]
    fn miss_after_ttl_expiry() {
        let cache: TtlCache<&str, i32> = TtlCache::new(Duration::from_millis(10));
        cache.put("k", 7);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get(&"k"), None);
        // stale entry was evicted, not just skipped
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_all_clears_every_entry() {
        let cache: TtlCache<&str, i32> = TtlCache::new(Duration::from_secs(60));
        cache.put("a", 1);
        cache.put("b", 2);
        cache.invalidate_all();
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.len(), 0);
    }
}
