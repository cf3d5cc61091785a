//! Cache Entry
//!
//! A stored value together with its pending eviction timer and callback.

use tokio::task::AbortHandle;

/// Callback invoked with the key and value when an entry is evicted or
/// explicitly removed. Fires at most once per entry.
pub(crate) type EvictCallback<K, V> = Box<dyn FnOnce(K, V) + Send>;

/// Handle to a scheduled one-shot eviction task.
///
/// Cancellation is tied to ownership: dropping the handle aborts the task,
/// which is safe even if the task already fired or was aborted before.
#[derive(Debug)]
pub(crate) struct EvictionTimer {
    handle: AbortHandle,
}

impl EvictionTimer {
    pub(crate) fn new(handle: AbortHandle) -> Self {
        Self { handle }
    }
}

impl Drop for EvictionTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A live entry in the cache
pub(crate) struct Entry<K, V> {
    pub(crate) value: V,
    pub(crate) on_evict: Option<EvictCallback<K, V>>,
    pub(crate) timer: EvictionTimer,
    /// Stamp assigned at `put` time; the eviction task only acts if the live
    /// entry still carries its stamp, so a superseded timer can never evict
    /// its successor.
    pub(crate) generation: u64,
}
