//! Response DTOs for the item service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheMetrics;
use crate::models::Item;

/// Pagination block of the listing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    /// Number of items matching the search, across all pages
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Computes the pagination block for `total` matches.
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let end = page.saturating_sub(1).saturating_mul(limit).saturating_add(limit);
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
            has_next: end < total,
            has_prev: page > 1,
        }
    }
}

/// Response body for the listing endpoint (GET /api/items)
#[derive(Debug, Clone, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<Item>,
    pub pagination: Pagination,
}

/// Generic `{ "message": ... }` body, used for errors and acknowledgements
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Creates a new MessageResponse
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the statistics cache counters (GET /api/stats/cache)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheMetricsResponse {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheMetrics> for CacheMetricsResponse {
    fn from(metrics: CacheMetrics) -> Self {
        Self {
            hits: metrics.hits,
            misses: metrics.misses,
            invalidations: metrics.invalidations,
            hit_rate: metrics.hit_rate(),
        }
    }
}
