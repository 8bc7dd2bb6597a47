//! Local caching module for offline data access.
//!
//! This module provides the `CacheManager` for storing and retrieving the
//! last successfully fetched standings. The snapshot is stored as JSON under
//! a fixed key and treated as absent once it is older than 24 hours.

pub mod manager;

pub use manager::{CacheManager, CachedData, CACHE_TTL, CACHE_TTL_MS, STANDINGS_CACHE_KEY};
