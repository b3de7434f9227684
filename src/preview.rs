//! Fixed-size windows into a trip table for raw-data display.

use crate::loader::{TripRecord, TripTable};

/// Rows shown per preview page.
pub const PAGE_SIZE: usize = 5;

/// Up to `count` rows starting at `offset`. Offsets past the end yield an empty slice.
pub fn slice(table: &TripTable, offset: usize, count: usize) -> &[TripRecord] {
    let records = table.records.as_slice();
    let start = offset.min(records.len());
    let end = offset.saturating_add(count).min(records.len());
    &records[start..end]
}

/// Page `page` (0-based) of [`PAGE_SIZE`] rows.
pub fn page(table: &TripTable, page: usize) -> &[TripRecord] {
    slice(table, page.saturating_mul(PAGE_SIZE), PAGE_SIZE)
}
