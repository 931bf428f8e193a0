use super::{Cache, Clock, SystemClock};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    /// Absolute expiry in epoch millis; `None` never expires
    expiry: Option<i64>,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self, now: i64) -> bool {
        matches!(self.expiry, Some(expiry) if expiry <= now)
    }
}

/// In-process TTL cache backed by a `HashMap`.
///
/// Expiry is lazy: an expired entry keeps counting towards [`Cache::size`]
/// until a `get`, `has`, `delete` or `clear` touches it.
pub struct MemoryCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    clock: Arc<dyn Clock>,
}

impl<T> MemoryCache<T> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        // A panic while holding the lock cannot leave the map half-written
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up `key`, dropping it from the map when it has expired.
    fn live_entry<'a>(
        entries: &'a mut HashMap<String, CacheEntry<T>>,
        key: &str,
        now: i64,
    ) -> Option<&'a CacheEntry<T>> {
        if entries.get(key)?.is_expired(now) {
            entries.remove(key);
            return None;
        }
        entries.get(key)
    }
}

impl<T> Default for MemoryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for MemoryCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("size", &self.entries().len())
            .finish()
    }
}

impl<T: Clone + Send> Cache<T> for MemoryCache<T> {
    fn set(&self, key: &str, value: T, ttl_secs: u64) {
        let expiry = if ttl_secs == 0 {
            None
        } else {
            let ttl_millis = i64::try_from(ttl_secs.saturating_mul(1000)).unwrap_or(i64::MAX);
            Some(self.clock.now_millis().saturating_add(ttl_millis))
        };

        self.entries()
            .insert(key.to_string(), CacheEntry { value, expiry });
    }

    fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now_millis();
        let mut entries = self.entries();
        Self::live_entry(&mut entries, key, now).map(|entry| entry.value.clone())
    }

    fn has(&self, key: &str) -> bool {
        let now = self.clock.now_millis();
        let mut entries = self.entries();
        Self::live_entry(&mut entries, key, now).is_some()
    }

    fn delete(&self, key: &str) {
        self.entries().remove(key);
    }

    fn clear(&self) {
        self.entries().clear();
    }

    fn size(&self) -> usize {
        self.entries().len()
    }
}
