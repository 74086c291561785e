//! # Table Collaborator
//!
//! The external tabular store the record store is built on. Only four
//! primitives are assumed:
//!
//! - `read(range)` returns every row in the range, header first
//! - `append(range, row)` adds a row after the last one
//! - `update(range, row)` overwrites the cells of a range
//! - `batch_update(request)` removes a span of rows
//!
//! No indexing, transactions or uniqueness constraints are assumed. Two
//! implementations are provided: an in-memory table and a Google Sheets
//! client.

pub mod auth;
pub mod errors;
pub mod memory;
pub mod range;
pub mod sheets;

use async_trait::async_trait;
use serde_json::Value;

use crate::record::RowPosition;

pub use auth::{Credentials, ServiceAccountAuth, ServiceAccountKey};
pub use errors::{TableError, TableResult};
pub use memory::{InMemoryTable, Primitive, TableCall};
pub use range::SheetRange;
pub use sheets::GoogleSheetsTable;

/// A positional row of scalar cells
pub type Row = Vec<Value>;

/// Request to remove a span of rows from one sheet.
///
/// Indices are zero-based, `end_index` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRowRequest {
    pub sheet_id: i64,
    pub start_index: usize,
    pub end_index: usize,
}

impl DeleteRowRequest {
    /// Request removing exactly the row at `position`
    pub fn for_position(sheet_id: i64, position: RowPosition) -> Self {
        let (start_index, end_index) = position.dimension_bounds();
        Self {
            sheet_id,
            start_index,
            end_index,
        }
    }
}

/// The external table primitives
#[async_trait]
pub trait TableCollaborator: Send + Sync {
    /// Read all rows in `range`. An empty sheet yields no rows.
    async fn read(&self, range: &SheetRange) -> TableResult<Vec<Row>>;

    /// Append `row` after the last row of the table in `range`
    async fn append(&self, range: &SheetRange, row: Row) -> TableResult<()>;

    /// Overwrite the cells addressed by `range` with `row`
    async fn update(&self, range: &SheetRange, row: Row) -> TableResult<()>;

    /// Remove the rows named by `request`
    async fn batch_update(&self, request: DeleteRowRequest) -> TableResult<()>;
}
