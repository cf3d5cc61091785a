//! TTL Cache
//!
//! In-memory key/value store with per-entry expiration timers and
//! eviction callbacks.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use hashbrown::HashMap;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{CacheConfig, DEFAULT_TTL};
use crate::entry::{Entry, EvictCallback, EvictionTimer};
use crate::key;

/// Per-put overrides for TTL and eviction notification
pub struct PutOptions<K, V> {
    ttl: Option<Duration>,
    on_evict: Option<EvictCallback<K, V>>,
}

impl<K, V> PutOptions<K, V> {
    /// Create empty options: store default TTL, no eviction callback
    pub fn new() -> Self {
        Self {
            ttl: None,
            on_evict: None,
        }
    }

    /// Override the store's default TTL for this entry
    ///
    /// A zero duration is ignored and the default TTL applies instead.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Invoke `callback` with the key and value when the entry is evicted
    /// or explicitly removed
    pub fn with_callback(mut self, callback: impl FnOnce(K, V) + Send + 'static) -> Self {
        self.on_evict = Some(Box::new(callback));
        self
    }
}

impl<K, V> Default for PutOptions<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared interior state, reachable from the per-entry timer tasks
struct Inner<K, V> {
    entries: HashMap<String, Entry<K, V>>,
    default_ttl: Duration,
    next_generation: u64,
}

/// In-memory key/value store with automatic TTL expiration
///
/// Every `put` schedules a one-shot timer that removes the entry when its TTL
/// elapses; re-putting a key cancels the pending timer and starts a fresh
/// one, so the most recent `put` always wins. Removal, whether explicit or
/// timer-driven, goes through one routine and fires the entry's eviction
/// callback exactly once.
///
/// Keys are anything serializable: structurally equal keys address the same
/// entry. `Cache` is a cheap handle (`Clone` shares state); separate
/// constructions are fully independent. Timers run on the ambient Tokio
/// runtime, so the cache must be used from within one.
///
/// # Example
///
/// ```rust,no_run
/// use memocache::Cache;
///
/// #[tokio::main]
/// async fn main() {
///     let cache: Cache<&str, u64> = Cache::new();
///     cache.put("answer", 42);
///     assert_eq!(cache.get(&"answer"), Some(42));
/// }
/// ```
pub struct Cache<K, V> {
    inner: Arc<Mutex<Inner<K, V>>>,
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for Cache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Cache")
            .field("entries", &inner.entries.len())
            .field("default_ttl", &inner.default_ttl)
            .finish()
    }
}

impl<K, V> Cache<K, V> {
    /// Create a new empty cache with the default configuration
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create a new empty cache with a custom configuration
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: HashMap::new(),
                default_ttl: sanitize_ttl(config.default_ttl),
                next_generation: 0,
            })),
        }
    }

    /// The TTL applied to puts without an explicit TTL
    pub fn default_ttl(&self) -> Duration {
        self.inner.lock().default_ttl
    }

    /// Change the default TTL for subsequent puts
    ///
    /// Entries already stored keep their original deadline. A zero duration
    /// is replaced by [`DEFAULT_TTL`].
    pub fn set_default_ttl(&self, ttl: Duration) {
        self.inner.lock().default_ttl = sanitize_ttl(ttl);
    }

    /// Number of live entries
    pub fn size(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Check whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Drop every entry and cancel every pending timer.
    ///
    /// Clearing is a bulk reset, not an eviction: per-entry callbacks are
    /// deliberately not invoked.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let dropped = inner.entries.len();
        inner.entries.clear();
        drop(inner);
        debug!(entries = dropped, "cache cleared");
    }
}

impl<K, V> Cache<K, V>
where
    K: Serialize,
{
    /// Check whether a live entry exists for `key`
    pub fn contains_key(&self, key: &K) -> bool {
        match key::normalize(key) {
            Ok(normalized) => self.inner.lock().entries.contains_key(&normalized),
            Err(_) => false,
        }
    }
}

impl<K, V> Cache<K, V>
where
    K: Serialize,
    V: Clone,
{
    /// Look up the cached value for `key`
    ///
    /// Returns `None` if no live entry exists. Reading never refreshes or
    /// extends an entry's TTL.
    pub fn get(&self, key: &K) -> Option<V> {
        let normalized = key::normalize(key).ok()?;
        self.inner
            .lock()
            .entries
            .get(&normalized)
            .map(|entry| entry.value.clone())
    }
}

impl<K, V> Cache<K, V>
where
    K: Serialize + Clone + Send + 'static,
    V: Send + 'static,
{
    /// Insert `value` under `key` with the store's default TTL
    pub fn put(&self, key: K, value: V) {
        self.put_with(key, value, PutOptions::new());
    }

    /// Insert `value` under `key`, honoring per-entry TTL and callback
    /// overrides.
    ///
    /// A put on an existing key fully supersedes the prior entry: its pending
    /// timer is cancelled and its callback is discarded without being
    /// invoked.
    pub fn put_with(&self, key: K, value: V, options: PutOptions<K, V>) {
        let normalized = match key::normalize(&key) {
            Ok(normalized) => normalized,
            Err(err) => {
                warn!(error = %err, "dropping put for unserializable key");
                return;
            }
        };

        let mut inner = self.inner.lock();
        let ttl = options
            .ttl
            .filter(|ttl| !ttl.is_zero())
            .unwrap_or(inner.default_ttl);
        let generation = inner.next_generation;
        inner.next_generation += 1;

        let timer = self.schedule_eviction(key, normalized.clone(), generation, ttl);
        let superseded = inner.entries.insert(
            normalized,
            Entry {
                value,
                on_evict: options.on_evict,
                timer,
                generation,
            },
        );
        drop(inner);

        // Dropping the superseded entry aborts its pending timer.
        drop(superseded);
    }

    /// Remove the entry for `key`, if any, and notify its callback.
    ///
    /// Idempotent: an absent or already-evicted key is a no-op. The callback
    /// receives the key passed to this call, which need not be the instance
    /// originally given to `put`.
    pub fn remove(&self, key: &K) {
        let normalized = match key::normalize(key) {
            Ok(normalized) => normalized,
            Err(err) => {
                warn!(error = %err, "ignoring remove for unserializable key");
                return;
            }
        };

        let removed = self.inner.lock().entries.remove(&normalized);
        if let Some(entry) = removed {
            notify_eviction(key.clone(), entry);
        }
    }

    fn schedule_eviction(
        &self,
        key: K,
        normalized: String,
        generation: u64,
        ttl: Duration,
    ) -> EvictionTimer {
        let state = Arc::downgrade(&self.inner);
        let task = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            expire(state, key, &normalized, generation);
        });
        debug!(ttl = ?ttl, generation, "eviction scheduled");
        EvictionTimer::new(task.abort_handle())
    }
}

fn sanitize_ttl(ttl: Duration) -> Duration {
    if ttl.is_zero() {
        warn!("zero default TTL replaced by {:?}", DEFAULT_TTL);
        DEFAULT_TTL
    } else {
        ttl
    }
}

/// Timer-driven eviction path; converges on the same removal semantics as an
/// explicit `remove`.
fn expire<K, V>(state: Weak<Mutex<Inner<K, V>>>, key: K, normalized: &str, generation: u64) {
    let Some(state) = state.upgrade() else {
        // Cache was dropped while the timer slept.
        return;
    };

    let mut inner = state.lock();
    // A superseded or re-put entry carries a newer generation; evicting it
    // belongs to the newer timer.
    match inner.entries.get(normalized) {
        Some(entry) if entry.generation == generation => {}
        _ => return,
    }
    let removed = inner.entries.remove(normalized);
    drop(inner);

    if let Some(entry) = removed {
        debug!(generation, "entry expired");
        notify_eviction(key, entry);
    }
}

/// Shared tail of both removal paths: the entry is already out of the map,
/// its timer is cancelled here, and the callback fires at most once, outside
/// the interior lock.
fn notify_eviction<K, V>(key: K, entry: Entry<K, V>) {
    let Entry {
        value,
        on_evict,
        timer,
        ..
    } = entry;
    drop(timer);
    if let Some(callback) = on_evict {
        callback(key, value);
    }
}
