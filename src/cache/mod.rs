//! Pluggable key/value cache with TTL support.
//!
//! Consumers such as [`crate::i18n::LangService`] depend on the [`Cache`]
//! trait rather than a concrete store, so any conforming backend can be
//! injected. [`MemoryCache`] is the default in-process implementation.
//!
//! # Example
//!
//! ```rust
//! use mycore_client::cache::{Cache, MemoryCache};
//!
//! let cache: MemoryCache<String> = MemoryCache::new();
//! cache.set("en_greeting", "Hello".to_string(), 0);
//! assert_eq!(cache.get("en_greeting").as_deref(), Some("Hello"));
//! ```

mod clock;
mod memory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::MemoryCache;

/// Key/value store with optional per-entry expiry.
///
/// Methods take `&self` so a single store can be shared through an `Arc`
/// between the component that created it and the services consuming it.
///
/// Expired entries must behave as absent on `get`/`has` and are removed as a
/// side effect of that access. No background eviction is required.
pub trait Cache<T>: Send + Sync {
    /// Store `value` under `key`, replacing any existing entry and its expiry.
    ///
    /// `ttl_secs == 0` means the entry never expires.
    fn set(&self, key: &str, value: T, ttl_secs: u64);

    /// Return the live value for `key`, purging it if expired.
    fn get(&self, key: &str) -> Option<T>;

    /// Same liveness check as [`Cache::get`] without cloning the value.
    fn has(&self, key: &str) -> bool;

    /// Remove `key` unconditionally. Absent keys are not an error.
    fn delete(&self, key: &str);

    fn clear(&self);

    /// Number of stored entries, including expired entries that have not
    /// been purged yet. This is a storage count, not a liveness count.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
