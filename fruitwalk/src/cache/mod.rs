//! Caching of fetched map regions.

mod region;

pub use region::{CacheEntry, RegionCache, RegionCacheStats, StaleEntryPolicy};
