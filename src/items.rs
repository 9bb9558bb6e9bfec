//! Item Listing Module
//!
//! Search, pagination and id assignment over the item collection.

use crate::models::{parse_int_prefix, Item, ItemListResponse, ListQuery, Pagination};

/// Keeps the items whose name or category contains `term`
/// (case-insensitive). `None` keeps everything.
pub fn search(items: Vec<Item>, term: Option<&str>) -> Vec<Item> {
    match term {
        Some(term) => {
            let needle = term.to_lowercase();
            items.into_iter().filter(|i| i.matches(&needle)).collect()
        }
        None => items,
    }
}

/// Slices one page out of `items`. `page` is 1-based; both arguments are
/// clamped to at least 1.
pub fn paginate(items: Vec<Item>, page: usize, limit: usize) -> ItemListResponse {
    let page = page.max(1);
    let limit = limit.max(1);
    let pagination = Pagination::new(page, limit, items.len());

    let start = (page - 1).saturating_mul(limit);
    let items = items.into_iter().skip(start).take(limit).collect();

    ItemListResponse { items, pagination }
}

/// Applies a listing query: search first, then paginate the matches.
pub fn list(items: Vec<Item>, query: &ListQuery) -> ItemListResponse {
    let term = query.search_term();
    paginate(search(items, term.as_deref()), query.page(), query.limit())
}

/// Looks an item up by the raw path segment, using its leading integer
/// (`"2abc"` finds id 2). A segment with no leading digits matches nothing.
pub fn find<'a>(items: &'a [Item], raw_id: &str) -> Option<&'a Item> {
    let id = parse_int_prefix(raw_id)?;
    items.iter().find(|i| i.id == id)
}

/// Next id: the current Unix time in milliseconds, bumped past the largest
/// existing id so ids stay unique and increase with creation order.
pub fn next_id(items: &[Item], now_ms: i64) -> i64 {
    match items.iter().map(|i| i.id).max() {
        Some(max) if max >= now_ms => max + 1,
        _ => now_ms,
    }
}
