#![warn(missing_docs)]
//! # storefront-cache
//!
//! In-memory TTL cache used to memoize downstream catalog lookups.
//!
//! [`TtlCache`] is a process-wide key→value store with:
//!
//! - per-entry expiry (entries are never returned past their deadline)
//! - a hard cap on entry count with oldest-write-first eviction
//! - substring-based invalidation for grouped keys
//! - hit/miss/byte statistics
//! - a background sweep task with explicit start and shutdown
//!
//! Values are serialized to JSON bytes on `set` and deserialized on `get`,
//! so any `serde`-capable type can be cached. Internal faults (such as a
//! value that fails to serialize) never surface to the caller: operations
//! degrade to a no-op or a miss and log a warning.
//!
//! The cache is explicitly constructed and injected into whatever component
//! needs it; there is no global singleton.
//!
//! ```ignore
//! use storefront_cache::{CacheConfig, TtlCache};
//! use std::time::Duration;
//!
//! let cache = TtlCache::new(CacheConfig::default());
//! let sweeper = cache.start_sweeper();
//!
//! cache.set("products:page=1", &products, Duration::from_secs(120));
//! let cached: Option<Vec<Product>> = cache.get("products:page=1");
//!
//! sweeper.shutdown();
//! ```

pub mod cache;
pub mod config;
pub mod entry;
pub mod stats;
pub mod sweeper;

pub use cache::TtlCache;
pub use config::CacheConfig;
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use sweeper::SweeperHandle;
