//! Request DTOs for the item service API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::NewItem;

/// Message returned for any malformed creation payload.
pub const INVALID_ITEM_MESSAGE: &str =
    "Invalid item data. Name, category, and price are required.";

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

/// Request body for item creation (POST /api/items)
///
/// The body is accepted as raw JSON so that a wrong-typed field is reported
/// as a validation failure rather than a deserialization rejection.
#[derive(Debug, Clone)]
pub struct CreateItemRequest;

impl CreateItemRequest {
    /// Validates a creation body.
    ///
    /// `name` and `category` must be non-empty strings and `price` a number.
    /// Any other fields are ignored.
    pub fn parse(body: &Value) -> Result<NewItem, ApiError> {
        let invalid = || ApiError::Validation(INVALID_ITEM_MESSAGE.to_string());

        let name = non_empty_str(body.get("name")).ok_or_else(invalid)?;
        let category = non_empty_str(body.get("category")).ok_or_else(invalid)?;
        let price = body
            .get("price")
            .filter(|v| v.is_number())
            .and_then(Value::as_f64)
            .filter(|p| p.is_finite())
            .ok_or_else(invalid)?;

        Ok(NewItem {
            name: name.to_string(),
            category: category.to_string(),
            price,
        })
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Query string for the listing endpoint (GET /api/items)
///
/// `page` and `limit` are taken leniently: anything that is not a positive
/// integer falls back to the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Search term matched against name and category
    #[serde(default)]
    pub q: Option<String>,
    /// 1-based page number
    #[serde(default)]
    pub page: Option<String>,
    /// Page size
    #[serde(default)]
    pub limit: Option<String>,
}

impl ListQuery {
    /// Lowercased search term. Only an empty `q` disables the search;
    /// whitespace is matched literally.
    pub fn search_term(&self) -> Option<String> {
        self.q
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    pub fn page(&self) -> usize {
        positive_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> usize {
        positive_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }
}

fn positive_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(parse_int_prefix)
        .filter(|v| *v > 0)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Parses the leading integer of `raw`: optional whitespace, an optional
/// sign, then decimal digits up to the first non-digit. `"2abc"` is `2`,
/// `"abc"` is `None`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}
