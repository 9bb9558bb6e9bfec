//! Cache Entry Module
//!
//! The memoized aggregate together with the staleness signal it was
//! computed against.

use crate::cache::StatisticsAggregate;
use crate::storage::StalenessSignal;

// == Cache Entry ==
/// One computed aggregate. Replaced wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The memoized aggregate
    pub value: StatisticsAggregate,
    /// Signal observed before the collection was read
    pub computed_at: StalenessSignal,
}

impl CacheEntry {
    pub fn new(value: StatisticsAggregate, computed_at: StalenessSignal) -> Self {
        Self { value, computed_at }
    }

    // == Is Valid For ==
    /// Checks whether the entry may be served for the `current` signal.
    ///
    /// Boundary condition: an equal or earlier signal keeps the entry valid,
    /// so a clock that moves backwards or several writes landing within one
    /// timestamp tick do not force a recomputation. Only a strictly later
    /// signal invalidates.
    pub fn is_valid_for(&self, current: StalenessSignal) -> bool {
        current <= self.computed_at
    }
}
