//! Cache Module
//!
//! Memoizes the item statistics aggregate, validated against the backing
//! store's staleness signal.

mod aggregate;
mod entry;
mod metrics;
mod stats_cache;


// Re-export public types
pub use aggregate::{compute, round_half_up_2, PriceRange, StatisticsAggregate};
pub use entry::CacheEntry;
pub use metrics::{CacheCounters, CacheMetrics};
pub use stats_cache::StatsCache;
