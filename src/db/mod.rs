//! Storage collaborator: JSON rows addressed by table, with in-memory and PostgreSQL backends.

mod memory;
mod postgres;
mod repo;

pub use memory::MemoryDatabase;
pub use postgres::PgDatabase;
pub use repo::Repo;

use crate::error::AppError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One record as a JSON object keyed by column name.
pub type Row = Map<String, Value>;

/// Table name plus its primary key column (single column PK only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Table {
    pub name: &'static str,
    pub id_column: &'static str,
}

impl Table {
    pub const fn new(name: &'static str, id_column: &'static str) -> Self {
        Table { name, id_column }
    }
}

/// Row-level operations the generated handlers need.
///
/// Filters are exact matches on column values, combined with AND. An empty
/// filter list selects every row but deletes none.
#[async_trait]
pub trait Database: Send + Sync + 'static {
    async fn ping(&self) -> Result<(), AppError>;

    async fn find(&self, table: Table, id: &Value) -> Result<Option<Value>, AppError>;

    async fn select(&self, table: Table, filters: &[(String, Value)]) -> Result<Vec<Value>, AppError>;

    async fn select_in(&self, table: Table, column: &str, values: &[Value]) -> Result<Vec<Value>, AppError>;

    /// Insert one row; columns absent from `row` take the storage default. Returns the stored row.
    async fn insert(&self, table: Table, row: &Row) -> Result<Value, AppError>;

    /// Set the columns present in `row` on the record with `id`. `None` when no such record.
    async fn update(&self, table: Table, id: &Value, row: &Row) -> Result<Option<Value>, AppError>;

    /// Delete by id. Returns the deleted row or `None`.
    async fn delete(&self, table: Table, id: &Value) -> Result<Option<Value>, AppError>;

    async fn delete_where(&self, table: Table, filters: &[(String, Value)]) -> Result<u64, AppError>;
}
