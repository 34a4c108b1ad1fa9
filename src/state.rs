//! Shared application state for all generated routes.

use crate::db::{Database, MemoryDatabase};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
}

impl AppState {
    pub fn new(db: impl Database) -> Self {
        AppState { db: Arc::new(db) }
    }

    /// State backed by a fresh in-memory database.
    pub fn memory() -> Self {
        Self::new(MemoryDatabase::new())
    }

    pub fn db(&self) -> &dyn Database {
        self.db.as_ref()
    }
}
