//! Cache entry with expiration metadata.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::mem::size_of;

/// A cached value with its expiry deadline and write sequence number.
///
/// The value is held as serialized bytes; `Bytes` gives cheap reference-
/// counted cloning out of the shared map. The sequence number is assigned
/// per write and orders entries for oldest-write-first eviction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    value: Bytes,
    expires_at: DateTime<Utc>,
    seq: u64,
}

impl CacheEntry {
    /// Creates a new entry.
    pub fn new(value: Bytes, expires_at: DateTime<Utc>, seq: u64) -> Self {
        CacheEntry {
            value,
            expires_at,
            seq,
        }
    }

    /// Returns the serialized value bytes.
    #[inline]
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    /// Returns the write sequence number.
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Returns `true` once `now` has passed the expiry deadline.
    ///
    /// An expired entry must never be returned to a reader.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Estimated memory footprint of this entry in bytes.
    ///
    /// Fixed struct overhead plus the serialized value bytes; feeds the
    /// `approx_value_bytes` figure in cache statistics.
    pub fn memory_size(&self) -> usize {
        size_of::<Self>() + self.value.len()
    }
}
