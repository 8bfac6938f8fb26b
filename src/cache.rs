//! Process-local key/value cache with per-entry expiry.
//!
//! Entries expire lazily: a read at or past the deadline drops the entry and
//! reports a miss. There is no background sweep and no coupling to writes
//! elsewhere, so callers pick TTLs they can tolerate being stale for.

use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use serde_json::Value;

/// Cache interface handed to handlers through `AppState`.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value, ttl: Duration);
    /// `None` empties the cache, `Some(key)` removes only that key.
    fn clear(&self, key: Option<&str>);
}

struct Entry<V> {
    value: V,
    /// `None` when the TTL runs past what `Instant` can represent.
    expires_at: Option<Instant>,
}

pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        match entries.get(key) {
            Some(entry) if entry.expires_at.map_or(true, |at| now < at) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn set_at(&self, key: &str, value: V, ttl: Duration, now: Instant) {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now.checked_add(ttl),
            },
        );
    }

    pub fn remove(&self, key: Option<&str>) {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        match key {
            Some(k) => {
                entries.remove(k);
            }
            None => entries.clear(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for TtlCache<Value> {
    fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, Instant::now())
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        self.set_at(key, value, ttl, Instant::now())
    }

    fn clear(&self, key: Option<&str>) {
        self.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn returns_value_before_expiry_and_misses_at_deadline() {
        let cache = TtlCache::new();
        let t0 = Instant::now();
        cache.set_at("k", 1, Duration::from_millis(100), t0);

        assert_eq!(cache.get_at("k", t0), Some(1));
        assert_eq!(cache.get_at("k", t0 + Duration::from_millis(99)), Some(1));
        assert_eq!(cache.get_at("k", t0 + Duration::from_millis(100)), None);
    }

    #[test]
    fn expired_read_drops_entry() {
        let cache = TtlCache::new();
        let t0 = Instant::now();
        cache.set_at("k", "v", Duration::from_secs(1), t0);
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(5)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn set_overwrites_and_resets_deadline() {
        let cache = TtlCache::new();
        let t0 = Instant::now();
        cache.set_at("k", 1, Duration::from_secs(1), t0);
        cache.set_at("k", 2, Duration::from_secs(10), t0 + Duration::from_millis(900));

        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(5)), Some(2));
    }

    #[test]
    fn clear_key_removes_only_that_key() {
        let cache: TtlCache<Value> = TtlCache::new();
        cache.set("a", json!(1), Duration::from_secs(60));
        cache.set("b", json!(2), Duration::from_secs(60));

        cache.clear(Some("a"));
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(json!(2)));
    }

    #[test]
    fn clear_all_empties_cache() {
        let cache: TtlCache<Value> = TtlCache::new();
        cache.set("a", json!(1), Duration::from_secs(60));
        cache.set("b", json!(2), Duration::from_secs(60));

        cache.clear(None);
        assert!(cache.is_empty());
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn oversized_ttl_never_expires() {
        let cache = TtlCache::new();
        let t0 = Instant::now();
        cache.set_at("k", 1, Duration::MAX, t0);
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(86_400 * 365)), Some(1));

        let cache: TtlCache<Value> = TtlCache::new();
        cache.set("k", json!(1), Duration::from_secs(u64::MAX));
        assert_eq!(cache.get("k"), Some(json!(1)));
    }

    #[test]
    fn missing_key_is_absent() {
        let cache: TtlCache<Value> = TtlCache::new();
        assert_eq!(cache.get("nope"), None);
    }
}
