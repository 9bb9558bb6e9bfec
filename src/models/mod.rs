//! Request and Response models for the item service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, plus the
//! persisted `Item` record itself.

pub mod item;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use item::{Item, NewItem};
pub use requests::{parse_int_prefix, CreateItemRequest, ListQuery, INVALID_ITEM_MESSAGE};
pub use responses::{
    CacheMetricsResponse, HealthResponse, ItemListResponse, MessageResponse, Pagination,
};
