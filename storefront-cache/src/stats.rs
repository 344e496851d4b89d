//! Cache statistics snapshot.

use serde::Serialize;

/// Point-in-time view of cache occupancy and traffic.
///
/// Byte figures are approximations: keys count their characters, values
/// count per-entry struct overhead plus serialized bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of live entries.
    pub entry_count: usize,
    /// Reads answered from the cache since construction.
    pub hit_count: u64,
    /// Reads that found nothing usable since construction.
    pub miss_count: u64,
    /// Approximate total size of all keys, in bytes.
    pub approx_key_bytes: usize,
    /// Approximate total memory held by entries, in bytes.
    pub approx_value_bytes: usize,
}
