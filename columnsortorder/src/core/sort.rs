//! Merge a persisted column order with the live column set.

use crate::core::identifier::{CHECKBOX_COLUMN, order_key};
use crate::core::order::ColumnOrder;
use crate::core::positions::ColumnPositions;

/// Order `live` according to the persisted `enabled` order.
///
/// - An empty persisted order returns `live` unchanged.
/// - Persisted identifiers are normalized with [`order_key`] and keep their
///   relative order; their position is their index in `enabled`.
/// - `live` is overlaid: shared keys take the live position without moving,
///   live-only keys are appended in live order.
/// - `checkbox_column`, when present, is moved to the front.
pub fn sort_columns(enabled: &ColumnOrder, live: &ColumnPositions) -> ColumnPositions {
    if enabled.is_empty() {
        return live.clone();
    }

    let mut merged: ColumnPositions = enabled
        .iter()
        .enumerate()
        .map(|(position, id)| (order_key(id), position as i64))
        .collect();
    merged.overlay(live);
    merged.pin_first(CHECKBOX_COLUMN);
    merged
}
