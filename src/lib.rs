//! # Memocache
//!
//! An embeddable in-memory key/value store that expires entries after a
//! configurable time-to-live, notifying a caller-supplied callback on
//! eviction. Meant as a building block for ephemeral memoization (request
//! or result caching) without external storage.
//!
//! ## Features
//!
//! - Arbitrary serializable keys: structurally equal keys address one entry
//! - Per-entry, resettable expiration timers (the most recent `put` wins)
//! - Exactly-once eviction callbacks, shared by the timer and explicit
//!   removal paths
//! - Handle semantics: clone a cache freely; separate constructions are
//!   fully independent
//!
//! Timers run on the ambient Tokio runtime, so a cache must be created and
//! used from within one.
//!
//! ## Example
//!
//! ```rust,no_run
//! use memocache::{Cache, CacheConfig, PutOptions};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache: Cache<&str, String> = Cache::with_config(
//!         CacheConfig::default().with_default_ttl(Duration::from_secs(30)),
//!     );
//!
//!     cache.put("session:42", "alice".to_string());
//!
//!     cache.put_with(
//!         "token",
//!         "xyz".to_string(),
//!         PutOptions::new()
//!             .with_ttl(Duration::from_secs(5))
//!             .with_callback(|key, value| println!("evicted {key} => {value}")),
//!     );
//!
//!     assert_eq!(cache.get(&"session:42").as_deref(), Some("alice"));
//! }
//! ```

mod cache;
mod config;
mod entry;
mod key;

pub use cache::{Cache, PutOptions};
pub use config::{CacheConfig, DEFAULT_TTL};
