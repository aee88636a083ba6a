//! Per-zoom region cache.
//!
//! Holds at most one entry per zoom level: the bounding box of the last
//! successful fetch at that zoom and its payload. A lookup hits only when the
//! cached box fully contains the requested box and the payload kind matches.
//!
//! All operations take one short `parking_lot` lock, so reads and writes never
//! interleave. The lock is never held across an await.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::trace;

use crate::geo::BoundingBox;
use crate::model::{FetchKind, Payload};

/// What a lookup does with an entry that cannot serve the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleEntryPolicy {
    /// Leave the entry in place. It is replaced on the next store.
    #[default]
    Retain,
    /// Remove the entry on a miss.
    Evict,
}

impl StaleEntryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaleEntryPolicy::Retain => "retain",
            StaleEntryPolicy::Evict => "evict",
        }
    }
}

impl fmt::Display for StaleEntryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaleEntryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(StaleEntryPolicy::Retain),
            "evict" => Ok(StaleEntryPolicy::Evict),
            other => Err(format!("unknown stale entry policy '{}'", other)),
        }
    }
}

/// A cached fetch result.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub bounds: BoundingBox,
    pub payload: Payload,
}

/// Cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub evictions: u64,
}

impl RegionCacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl fmt::Display for RegionCacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hits, {} misses ({:.0}% hit rate), {} stores, {} evictions",
            self.hits,
            self.misses,
            self.hit_rate() * 100.0,
            self.stores,
            self.evictions
        )
    }
}

/// Map from zoom level to the last fetched region at that zoom.
#[derive(Debug, Default)]
pub struct RegionCache {
    entries: Mutex<HashMap<u8, CacheEntry>>,
    policy: StaleEntryPolicy,
    hits: AtomicU64,
    misses: AtomicU64,
    stores: AtomicU64,
    evictions: AtomicU64,
}

impl RegionCache {
    pub fn new(policy: StaleEntryPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> StaleEntryPolicy {
        self.policy
    }

    /// Returns the payload cached at `zoom` if it covers `bounds`.
    ///
    /// # Arguments
    ///
    /// * `zoom` - Zoom level to look up
    /// * `bounds` - Box the caller needs covered
    /// * `kind` - Payload kind the caller expects
    pub fn lookup(&self, zoom: u8, bounds: &BoundingBox, kind: FetchKind) -> Option<Payload> {
        let mut entries = self.entries.lock();

        let covered = match entries.get(&zoom) {
            Some(entry) if entry.payload.kind() == kind && entry.bounds.contains(bounds) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(zoom = zoom, kind = %kind, "Region cache hit");
                return Some(entry.payload.clone());
            }
            Some(_) => true,
            None => false,
        };

        self.misses.fetch_add(1, Ordering::Relaxed);
        if covered && self.policy == StaleEntryPolicy::Evict {
            entries.remove(&zoom);
            self.evictions.fetch_add(1, Ordering::Relaxed);
            trace!(zoom = zoom, "Evicted region cache entry that missed");
        }
        None
    }

    /// Stores `payload` as the entry for `zoom`, replacing any previous entry.
    pub fn store(&self, zoom: u8, bounds: BoundingBox, payload: Payload) {
        let previous = self
            .entries
            .lock()
            .insert(zoom, CacheEntry { bounds, payload });
        self.stores.fetch_add(1, Ordering::Relaxed);
        if previous.is_some() {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Returns a copy of the entry at `zoom`.
    pub fn entry(&self, zoom: u8) -> Option<CacheEntry> {
        self.entries.lock().get(&zoom).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn stats(&self) -> RegionCacheStats {
        RegionCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}
