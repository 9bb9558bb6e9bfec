//! API Module
//!
//! HTTP handlers and routing for the item service REST API.
//!
//! # Endpoints
//! - `GET /api/items` - Search and paginate items
//! - `GET /api/items/:id` - Fetch one item
//! - `POST /api/items` - Create an item
//! - `GET /api/stats` - Aggregate statistics (cached)
//! - `GET /api/stats/cache` - Statistics cache counters
//! - `DELETE /api/stats/cache` - Invalidate the statistics cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
