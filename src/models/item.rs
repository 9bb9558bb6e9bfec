//! Item record
//!
//! The single persisted entity. The collection file is a JSON array of these.

use serde::{Deserialize, Serialize, Serializer};

/// Largest integer a JSON consumer can represent exactly as a double.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

// == Item ==
/// A catalogue item as stored in the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Server-assigned identifier, increasing with creation order
    pub id: i64,
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Price in currency units
    #[serde(serialize_with = "serialize_number")]
    pub price: f64,
}

impl Item {
    /// Case-insensitive substring match against name or category.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

// == New Item ==
/// Validated creation payload, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl NewItem {
    /// Attaches the server-assigned id.
    pub fn with_id(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
        }
    }
}

// == Number Serialization ==
/// Serializes integral floats as JSON integers (`2499` rather than `2499.0`).
pub fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
