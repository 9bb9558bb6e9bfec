//! Item Stats - item catalogue REST API
//!
//! Serves a JSON-file backed item collection and an aggregate statistics
//! view memoized against the file's modification time.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod items;
pub mod models;
pub mod storage;

pub use api::AppState;
pub use cache::StatsCache;
pub use config::Config;
