//! Shared handler state

use std::sync::Arc;

use crate::preferences::{MemoryPreferenceStorage, ThemeStore};
use crate::store::RecordStore;
use crate::table::{InMemoryTable, SheetRange, TableCollaborator};

/// State shared across all handlers
pub struct AppState {
    pub store: RecordStore<dyn TableCollaborator>,
    pub theme: ThemeStore,
}

impl AppState {
    pub fn new(store: RecordStore<dyn TableCollaborator>, theme: ThemeStore) -> Self {
        Self { store, theme }
    }

    /// State over an in-memory table with in-memory preferences
    pub fn in_memory(table: Arc<InMemoryTable>) -> Self {
        let table: Arc<dyn TableCollaborator> = table;
        let theme = ThemeStore::new(Box::new(MemoryPreferenceStorage::new()));
        Self::new(
            RecordStore::new(table, SheetRange::sheet("Sheet1"), 0),
            theme,
        )
    }
}
