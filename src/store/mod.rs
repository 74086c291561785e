//! # Record Store Module
//!
//! Customer CRUD on top of a table collaborator, with list filtering and
//! pagination.

pub mod errors;
pub mod payload;
pub mod query;
pub mod record_store;

pub use errors::{StoreError, StoreResult};
pub use payload::CustomerPayload;
pub use query::{ListOutcome, ListQuery, Page, Pagination};
pub use record_store::RecordStore;
