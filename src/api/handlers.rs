//! API Handlers
//!
//! HTTP request handlers for each item service endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::{StatisticsAggregate, StatsCache};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::items;
use crate::models::{
    CacheMetricsResponse, CreateItemRequest, HealthResponse, Item, ItemListResponse, ListQuery,
    MessageResponse, INVALID_ITEM_MESSAGE,
};
use crate::storage::{ItemStore, JsonFileStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Backing item collection
    pub store: Arc<dyn ItemStore>,
    /// Statistics cache in front of the same store
    pub stats: Arc<StatsCache>,
    /// Serializes read-modify-write cycles on the collection
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates a new AppState with the given item store.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            stats: Arc::new(StatsCache::new(store.clone())),
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Backs the service with the JSON file at `config.data_path`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(JsonFileStore::new(config.data_path.clone())))
    }
}

/// Handler for GET /api/items
///
/// Query parameters: `q` (search), `page`, `limit`.
pub async fn list_items_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ItemListResponse>> {
    let all = state
        .store
        .read_all()
        .await
        .map_err(ApiError::storage_context)?;

    Ok(Json(items::list(all, &query)))
}

/// Handler for GET /api/items/:id
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>> {
    let all = state
        .store
        .read_all()
        .await
        .map_err(ApiError::storage_context)?;

    items::find(&all, &id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))
}

/// Handler for POST /api/items
///
/// Validates the body, assigns an id and appends the item to the collection.
/// A missing, mistyped or unparsable body is a validation failure like any
/// other. The statistics cache is left alone; it notices the new file mtime.
pub async fn create_item_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>)> {
    let Json(body) = body.map_err(|rejection| {
        debug!("Rejected item body: {}", rejection.body_text());
        ApiError::Validation(INVALID_ITEM_MESSAGE.to_string())
    })?;
    let new_item = CreateItemRequest::parse(&body)?;

    let _guard = state.write_lock.lock().await;
    let mut all = state
        .store
        .read_all()
        .await
        .map_err(ApiError::storage_context)?;

    let id = items::next_id(&all, chrono::Utc::now().timestamp_millis());
    let item = new_item.with_id(id);
    all.push(item.clone());

    state
        .store
        .write_all(&all)
        .await
        .map_err(ApiError::storage_context)?;

    info!(id = item.id, category = %item.category, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /api/stats
///
/// Storage failures are reported with their raw message.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatisticsAggregate>> {
    let stats = state.stats.get().await?;
    Ok(Json(stats))
}

/// Handler for DELETE /api/stats/cache
pub async fn invalidate_stats_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.stats.invalidate().await;
    Json(MessageResponse::new("Cache invalidated"))
}

/// Handler for GET /api/stats/cache
pub async fn cache_metrics_handler(State(state): State<AppState>) -> Json<CacheMetricsResponse> {
    Json(state.stats.metrics().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for unknown routes.
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound("Route Not Found".to_string())
}
