//! In-memory table
//!
//! Holds a single sheet of rows in process. Every primitive call is
//! recorded so callers can check which external calls an operation made,
//! and each primitive can be made to fail on demand.
//!
//! Ranges are honoured from their first cell the way the Sheets API does:
//! `read` of `Sheet1!B2:G` skips the first row and the first column. The
//! end of a range is not applied.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use crate::record::{encode, Customer, COLUMNS};

use super::errors::{TableError, TableResult};
use super::range::SheetRange;
use super::{DeleteRowRequest, Row, TableCollaborator};

/// Table primitive, used to select injected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Read,
    Append,
    Update,
    BatchUpdate,
}

/// A recorded primitive call
#[derive(Debug, Clone, PartialEq)]
pub enum TableCall {
    Read { range: String },
    Append { range: String, row: Row },
    Update { range: String, row: Row },
    DeleteRows { sheet_id: i64, start_index: usize, end_index: usize },
}

impl TableCall {
    /// Whether this call mutates the table
    pub fn is_write(&self) -> bool {
        !matches!(self, TableCall::Read { .. })
    }
}

/// In-memory table with call recording and failure injection
#[derive(Debug, Default)]
pub struct InMemoryTable {
    rows: Mutex<Vec<Row>>,
    calls: Mutex<Vec<TableCall>>,
    failing: Mutex<HashSet<Primitive>>,
}

impl InMemoryTable {
    /// Completely empty table (no header)
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding `rows` (header first)
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    /// Table holding only the customer column header
    pub fn with_header() -> Self {
        Self::with_rows(vec![header_row()])
    }

    /// Table holding the header plus one row per customer
    pub fn with_customers(customers: &[Customer]) -> Self {
        let mut rows = vec![header_row()];
        rows.extend(customers.iter().map(|c| encode(&c.to_record())));
        Self::with_rows(rows)
    }

    /// Snapshot of the current rows
    pub fn rows(&self) -> Vec<Row> {
        relock(&self.rows).clone()
    }

    /// Snapshot of every call made so far
    pub fn calls(&self) -> Vec<TableCall> {
        relock(&self.calls).clone()
    }

    /// Number of mutating calls made so far
    pub fn write_count(&self) -> usize {
        relock(&self.calls).iter().filter(|c| c.is_write()).count()
    }

    /// Make every subsequent call of `primitive` fail
    pub fn fail(&self, primitive: Primitive) {
        relock(&self.failing).insert(primitive);
    }

    /// Stop failing `primitive`
    pub fn restore(&self, primitive: Primitive) {
        relock(&self.failing).remove(&primitive);
    }

    fn record(&self, call: TableCall, primitive: Primitive) -> TableResult<()> {
        relock(&self.calls).push(call);
        if relock(&self.failing).contains(&primitive) {
            return Err(TableError::Unavailable(format!(
                "{:?} failure injected",
                primitive
            )));
        }
        Ok(())
    }
}

/// Header row in the fixed column order
pub fn header_row() -> Row {
    COLUMNS.iter().map(|c| Value::String(c.to_string())).collect()
}

// A panic while holding one of these locks cannot leave the rows half
// written, so poisoned guards are recovered.
fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl TableCollaborator for InMemoryTable {
    async fn read(&self, range: &SheetRange) -> TableResult<Vec<Row>> {
        self.record(
            TableCall::Read {
                range: range.to_string(),
            },
            Primitive::Read,
        )?;

        let skip_rows = range.start_row().unwrap_or(1).saturating_sub(1);
        let skip_cols = range.start_column() - 1;
        Ok(relock(&self.rows)
            .iter()
            .skip(skip_rows)
            .map(|row| row.iter().skip(skip_cols).cloned().collect())
            .collect())
    }

    async fn append(&self, range: &SheetRange, row: Row) -> TableResult<()> {
        self.record(
            TableCall::Append {
                range: range.to_string(),
                row: row.clone(),
            },
            Primitive::Append,
        )?;

        let mut cells = vec![Value::String(String::new()); range.start_column() - 1];
        cells.extend(row);
        relock(&self.rows).push(cells);
        Ok(())
    }

    async fn update(&self, range: &SheetRange, row: Row) -> TableResult<()> {
        self.record(
            TableCall::Update {
                range: range.to_string(),
                row: row.clone(),
            },
            Primitive::Update,
        )?;

        let row_number = range
            .start_row()
            .filter(|n| *n > 0)
            .ok_or_else(|| TableError::InvalidRange(range.to_string()))?;

        let mut rows = relock(&self.rows);
        if rows.len() < row_number {
            rows.resize_with(row_number, Vec::new);
        }

        let first_col = range.start_column() - 1;
        let target = &mut rows[row_number - 1];
        if target.len() < first_col + row.len() {
            target.resize(first_col + row.len(), Value::String(String::new()));
        }
        for (i, cell) in row.into_iter().enumerate() {
            target[first_col + i] = cell;
        }
        Ok(())
    }

    async fn batch_update(&self, request: DeleteRowRequest) -> TableResult<()> {
        self.record(
            TableCall::DeleteRows {
                sheet_id: request.sheet_id,
                start_index: request.start_index,
                end_index: request.end_index,
            },
            Primitive::BatchUpdate,
        )?;

        let mut rows = relock(&self.rows);
        if request.start_index >= request.end_index || request.start_index >= rows.len() {
            return Err(TableError::InvalidRange(format!(
                "rows [{}, {}) outside table of {} rows",
                request.start_index,
                request.end_index,
                rows.len()
            )));
        }

        let end = request.end_index.min(rows.len());
        rows.drain(request.start_index..end);
        Ok(())
    }
}
