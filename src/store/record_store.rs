//! # Record Store
//!
//! CRUD operations composed from codec and locator calls against a table
//! collaborator.
//!
//! ## Invariants
//! - Validation happens before any table call
//! - Row positions are resolved by a fresh read immediately before each
//!   update or delete, and never reused across operations
//! - Located positions count from the first row of the configured range;
//!   writes translate them to sheet rows and columns
//! - No retries, no locks, no rollback: a failed call leaves the table as
//!   the collaborator left it
//!
//! Concurrent mutations are not coordinated. Two requests may both locate a
//! row before either writes, and the later write then lands on whatever row
//! occupies the stale position.

use std::sync::Arc;

use crate::record::{decode, decode_rows, encode, locate, Customer, Record, RowPosition};
use crate::table::{DeleteRowRequest, Row, SheetRange, TableCollaborator};

use super::errors::{StoreError, StoreResult};
use super::payload::CustomerPayload;
use super::query::{ListOutcome, ListQuery};

/// CRUD façade over a spreadsheet-like table
pub struct RecordStore<T: TableCollaborator + ?Sized> {
    table: Arc<T>,
    range: SheetRange,
    sheet_id: i64,
}

impl<T: TableCollaborator + ?Sized> RecordStore<T> {
    /// Create a store over `range` of `table`; `sheet_id` addresses row
    /// deletions.
    pub fn new(table: Arc<T>, range: SheetRange, sheet_id: i64) -> Self {
        Self {
            table,
            range,
            sheet_id,
        }
    }

    pub fn table(&self) -> &Arc<T> {
        &self.table
    }

    async fn read_rows(&self) -> StoreResult<Vec<Row>> {
        self.table.read(&self.range).await.map_err(StoreError::Fetch)
    }

    async fn locate_or_not_found(&self, id: &str) -> StoreResult<(Vec<Row>, RowPosition)> {
        let rows = self.read_rows().await?;
        match locate(&rows, id) {
            Some(position) => Ok((rows, position)),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// List records, filtered and optionally paginated
    pub async fn list(&self, query: &ListQuery) -> StoreResult<ListOutcome> {
        let rows = self.read_rows().await?;
        let records = decode_rows(&rows);
        let total = records.len();

        let outcome = query.apply(records);
        tracing::debug!(
            total,
            returned = outcome.records().len(),
            "listed records"
        );
        Ok(outcome)
    }

    /// Fetch a single record by id
    pub async fn get(&self, id: &str) -> StoreResult<Record> {
        let (rows, position) = self.locate_or_not_found(id).await?;
        let header = rows.first().map(Vec::as_slice).unwrap_or_default();
        let row = rows
            .get(position.row_number() - 1)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(decode(header, row))
    }

    /// Append a new record as the last row
    pub async fn create(&self, payload: CustomerPayload) -> StoreResult<Customer> {
        let customer = payload.into_customer()?;
        let row = encode(&customer.to_record());

        self.table
            .append(&self.range, row)
            .await
            .map_err(StoreError::Append)?;

        tracing::info!(id = %crate::record::cell_text(&customer.id), "customer added");
        Ok(customer)
    }

    /// Overwrite the row holding `id`; the id itself is kept from the path
    pub async fn update(&self, id: &str, payload: CustomerPayload) -> StoreResult<Customer> {
        let customer = payload.into_customer_with_id(id)?;
        let (_, position) = self.locate_or_not_found(id).await?;

        let range = self.range.record_row(position);
        self.table
            .update(&range, encode(&customer.to_record()))
            .await
            .map_err(StoreError::Update)?;

        tracing::info!(
            id,
            row = self.range.absolute(position).row_number(),
            "customer updated"
        );
        Ok(customer)
    }

    /// Remove the row holding `id`
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let (_, position) = self.locate_or_not_found(id).await?;

        let position = self.range.absolute(position);
        self.table
            .batch_update(DeleteRowRequest::for_position(self.sheet_id, position))
            .await
            .map_err(StoreError::Delete)?;

        tracing::info!(id, row = position.row_number(), "customer deleted");
        Ok(())
    }
}
