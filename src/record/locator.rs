//! # Row Locator
//!
//! Resolves a record id to its current row position by scanning the table.
//!
//! ## Invariants
//! - The header row is never matched
//! - The first matching data row wins; id uniqueness is not enforced
//! - Ids are compared as strings, so a numeric cell `7` matches `"7"`
//! - Positions are valid only until the next mutation of the table

use serde_json::Value;

use super::types::cell_text;

/// 1-based sheet row number of a located record.
///
/// The header occupies row 1, so the first data row is row 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowPosition(usize);

impl RowPosition {
    /// Position of the data row at `index` (0-based, header excluded)
    pub fn from_data_index(index: usize) -> Self {
        Self(index + 2)
    }

    /// Row number for A1 range addressing
    pub fn row_number(&self) -> usize {
        self.0
    }

    /// Same row seen from `rows` rows further up the sheet
    pub fn offset(&self, rows: usize) -> Self {
        Self(self.0 + rows)
    }

    /// Zero-based `[start, end)` bounds for a single-row dimension delete
    pub fn dimension_bounds(&self) -> (usize, usize) {
        (self.0 - 1, self.0)
    }
}

/// Locate the row holding `id`.
///
/// `rows` is the full table including its header. Returns `None` when the
/// table is empty, header-only, or no data row carries the id.
pub fn locate(rows: &[Vec<Value>], id: &str) -> Option<RowPosition> {
    rows.iter()
        .skip(1)
        .position(|row| row.first().map(cell_text).as_deref() == Some(id))
        .map(RowPosition::from_data_index)
}
