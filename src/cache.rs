//! In-memory caching using moka
//!
//! Memoizes successful geocoding lookups for the HTTP layer. Addresses and
//! landmarks are requested over and over by the quote screens, and the
//! provider is rate limited.

use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use tracing::info;

use crate::map::geocoding::normalize_query;
use crate::map::Coordinates;

/// Application cache for geocoding results
#[derive(Clone)]
pub struct AppCache {
    /// Forward lookups (normalized query -> coordinates)
    pub geocode: Cache<String, Coordinates>,
    /// Reverse lookups (rounded coordinates -> display name)
    pub reverse: Cache<String, String>,
}

impl AppCache {
    /// Create a new cache instance with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            // Forward lookups: 10k entries
            geocode: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),

            // Reverse lookups: 10k entries, idle entries dropped sooner
            reverse: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .time_to_idle(ttl / 2)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            geocode_size: self.geocode.entry_count(),
            reverse_size: self.reverse.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.geocode.invalidate_all();
        self.reverse.invalidate_all();
        info!("All caches invalidated");
    }

    /// Cache key for a forward lookup
    pub fn geocode_key(query: &str) -> String {
        normalize_query(query)
    }

    /// Cache key for a reverse lookup; points within ~1 m share a key
    pub fn reverse_key(coordinates: &Coordinates) -> String {
        format!("{:.5},{:.5}", coordinates.latitude, coordinates.longitude)
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(60 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub geocode_size: u64,
    pub reverse_size: u64,
}
