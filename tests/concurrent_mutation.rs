//! Concurrent Mutation Tests
//!
//! Row positions are resolved by a read immediately before each write, and
//! nothing coordinates two requests. When another client removes a row
//! between the locate and the write, the write lands on whatever row now
//! occupies the stale position. These tests pin that behavior down so a
//! change to it is deliberate.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use sheetdb::record::{decode_rows, locate, Customer, RowPosition};
use sheetdb::store::RecordStore;
use sheetdb::table::{
    DeleteRowRequest, InMemoryTable, Row, SheetRange, TableCollaborator, TableResult,
};

// =============================================================================
// Test Utilities
// =============================================================================

/// Table that lets a second client delete a row right before the next write
struct Interleaved {
    inner: Arc<InMemoryTable>,
    interloper: Mutex<Option<DeleteRowRequest>>,
}

impl Interleaved {
    fn new(inner: Arc<InMemoryTable>) -> Self {
        Self {
            inner,
            interloper: Mutex::new(None),
        }
    }

    /// Delete the row at `position` just before the next write
    fn delete_before_next_write(&self, position: RowPosition) {
        *self.interloper.lock().unwrap() = Some(DeleteRowRequest::for_position(0, position));
    }

    async fn run_interloper(&self) -> TableResult<()> {
        let pending = self.interloper.lock().unwrap().take();
        if let Some(request) = pending {
            self.inner.batch_update(request).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl TableCollaborator for Interleaved {
    async fn read(&self, range: &SheetRange) -> TableResult<Vec<Row>> {
        self.inner.read(range).await
    }

    async fn append(&self, range: &SheetRange, row: Row) -> TableResult<()> {
        self.run_interloper().await?;
        self.inner.append(range, row).await
    }

    async fn update(&self, range: &SheetRange, row: Row) -> TableResult<()> {
        self.run_interloper().await?;
        self.inner.update(range, row).await
    }

    async fn batch_update(&self, request: DeleteRowRequest) -> TableResult<()> {
        self.run_interloper().await?;
        self.inner.batch_update(request).await
    }
}

fn customers(count: u32) -> Vec<Customer> {
    (1..=count)
        .map(|i| Customer {
            id: json!(i),
            name: format!("Customer {}", i),
            email: format!("customer{}@example.com", i),
            phone: "555".to_string(),
            address: format!("{} Pine Road", i),
            transaction_amount: json!(i),
        })
        .collect()
}

fn setup(count: u32) -> (Arc<InMemoryTable>, Arc<Interleaved>, RecordStore<Interleaved>) {
    let memory = Arc::new(InMemoryTable::with_customers(&customers(count)));
    let table = Arc::new(Interleaved::new(memory.clone()));
    let store = RecordStore::new(table.clone(), SheetRange::sheet("Sheet1"), 0);
    (memory, table, store)
}

fn remaining_ids(table: &InMemoryTable) -> Vec<String> {
    decode_rows(&table.rows()).iter().map(|r| r.id_text()).collect()
}

// =============================================================================
// Stale Positions
// =============================================================================

#[tokio::test]
async fn test_delete_after_concurrent_delete_hits_next_row() {
    let (memory, table, store) = setup(3);

    // Another client removes customer 1 after our locate of customer 2
    let first = locate(&memory.rows(), "1").unwrap();
    table.delete_before_next_write(first);

    store.delete("2").await.unwrap();

    // Customer 2 shifted up into row 2, so row 3 (customer 3) was removed
    assert_eq!(remaining_ids(&memory), vec!["2"]);
}

#[tokio::test]
async fn test_update_after_concurrent_delete_overwrites_next_row() {
    let (memory, table, store) = setup(3);

    let first = locate(&memory.rows(), "1").unwrap();
    table.delete_before_next_write(first);

    let payload = serde_json::from_value(json!({
        "name": "Renamed",
        "email": "renamed@example.com",
        "phone": "555",
        "address": "2 Pine Road",
        "transactionAmount": 20
    }))
    .unwrap();
    store.update("2", payload).await.unwrap();

    // Customer 3's row now carries customer 2's id and fields
    assert_eq!(remaining_ids(&memory), vec!["2", "2"]);
    let records = decode_rows(&memory.rows());
    assert_eq!(records[0].text("name"), "Customer 2");
    assert_eq!(records[1].text("name"), "Renamed");
}

#[tokio::test]
async fn test_sequential_mutations_relocate() {
    let (memory, _, store) = setup(5);

    // Each operation re-reads, so deleting in sequence never drifts
    store.delete("2").await.unwrap();
    store.delete("4").await.unwrap();
    store.delete("5").await.unwrap();

    assert_eq!(remaining_ids(&memory), vec!["1", "3"]);
}
