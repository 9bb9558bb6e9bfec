//! Statistics Aggregate Module
//!
//! Pure computation of the summary statistics over an item collection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::item::serialize_number;
use crate::models::Item;

// == Price Range ==
/// Lowest and highest price in a collection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PriceRange {
    #[serde(serialize_with = "serialize_number")]
    pub min: f64,
    #[serde(serialize_with = "serialize_number")]
    pub max: f64,
}

// == Statistics Aggregate ==
/// Derived, immutable summary of one collection snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsAggregate {
    /// Number of items
    pub total: usize,
    /// Mean price rounded half-up to 2 decimals, 0 for an empty collection
    #[serde(serialize_with = "serialize_number")]
    pub average_price: f64,
    /// Item count per category
    pub categories: BTreeMap<String, usize>,
    /// `{0, 0}` for an empty collection
    pub price_range: PriceRange,
}

/// Computes the aggregate for `items`.
///
/// Prices are assumed finite; that is checked when items are created.
pub fn compute(items: &[Item]) -> StatisticsAggregate {
    let Some(first) = items.first() else {
        return StatisticsAggregate::default();
    };

    let mut categories = BTreeMap::new();
    let mut sum = 0.0;
    let mut range = PriceRange {
        min: first.price,
        max: first.price,
    };

    for item in items {
        sum += item.price;
        range.min = range.min.min(item.price);
        range.max = range.max.max(item.price);
        *categories.entry(item.category.clone()).or_insert(0) += 1;
    }

    StatisticsAggregate {
        total: items.len(),
        average_price: round_half_up_2(sum / items.len() as f64),
        categories,
        price_range: range,
    }
}

/// Rounds to 2 decimals, ties toward positive infinity.
pub fn round_half_up_2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}
