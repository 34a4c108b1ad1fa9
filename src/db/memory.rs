//! In-process storage backend. Rows keep insertion order; integer ids are assigned when missing.

use super::{Database, Row, Table};
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct MemTable {
    rows: Vec<Row>,
    next_id: i64,
}

impl MemTable {
    fn position(&self, id_column: &str, id: &Value) -> Option<usize> {
        self.rows.iter().position(|r| r.get(id_column) == Some(id))
    }

    fn observe_id(&mut self, id: &Value) {
        if let Some(n) = id.as_i64() {
            self.next_id = self.next_id.max(n);
        }
    }
}

#[derive(Default)]
pub struct MemoryDatabase {
    tables: RwLock<HashMap<&'static str, MemTable>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<&'static str, MemTable>>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Storage("memory database lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<&'static str, MemTable>>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Storage("memory database lock poisoned".into()))
    }
}

fn matches(row: &Row, filters: &[(String, Value)]) -> bool {
    filters
        .iter()
        .all(|(col, val)| row.get(col).unwrap_or(&Value::Null) == val)
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }

    async fn find(&self, table: Table, id: &Value) -> Result<Option<Value>, AppError> {
        let tables = self.read()?;
        let Some(t) = tables.get(table.name) else { return Ok(None) };
        Ok(t.position(table.id_column, id)
            .map(|i| Value::Object(t.rows[i].clone())))
    }

    async fn select(&self, table: Table, filters: &[(String, Value)]) -> Result<Vec<Value>, AppError> {
        let tables = self.read()?;
        let Some(t) = tables.get(table.name) else { return Ok(Vec::new()) };
        Ok(t.rows
            .iter()
            .filter(|r| matches(r, filters))
            .map(|r| Value::Object(r.clone()))
            .collect())
    }

    async fn select_in(&self, table: Table, column: &str, values: &[Value]) -> Result<Vec<Value>, AppError> {
        if values.is_empty() {
            return Ok(Vec::new());
        }
        let tables = self.read()?;
        let Some(t) = tables.get(table.name) else { return Ok(Vec::new()) };
        Ok(t.rows
            .iter()
            .filter(|r| r.get(column).map(|v| values.contains(v)).unwrap_or(false))
            .map(|r| Value::Object(r.clone()))
            .collect())
    }

    async fn insert(&self, table: Table, row: &Row) -> Result<Value, AppError> {
        let mut tables = self.write()?;
        let t = tables.entry(table.name).or_default();
        let mut row = row.clone();
        match row.get(table.id_column).filter(|v| !v.is_null()).cloned() {
            Some(id) => {
                if t.position(table.id_column, &id).is_some() {
                    return Err(AppError::Conflict(format!("{} id {} already exists", table.name, id)));
                }
                t.observe_id(&id);
            }
            None => {
                let next = t.next_id.checked_add(1).ok_or_else(|| {
                    AppError::Conflict(format!("{} has no integer ids left to assign", table.name))
                })?;
                t.next_id = next;
                row.insert(table.id_column.to_string(), Value::from(next));
            }
        }
        t.rows.push(row.clone());
        tracing::debug!(table = table.name, rows = t.rows.len(), "memory insert");
        Ok(Value::Object(row))
    }

    async fn update(&self, table: Table, id: &Value, row: &Row) -> Result<Option<Value>, AppError> {
        let mut tables = self.write()?;
        let Some(t) = tables.get_mut(table.name) else { return Ok(None) };
        let Some(i) = t.position(table.id_column, id) else { return Ok(None) };
        let existing = &mut t.rows[i];
        for (k, v) in row {
            if k == table.id_column {
                continue;
            }
            existing.insert(k.clone(), v.clone());
        }
        Ok(Some(Value::Object(existing.clone())))
    }

    async fn delete(&self, table: Table, id: &Value) -> Result<Option<Value>, AppError> {
        let mut tables = self.write()?;
        let Some(t) = tables.get_mut(table.name) else { return Ok(None) };
        Ok(t.position(table.id_column, id)
            .map(|i| Value::Object(t.rows.remove(i))))
    }

    async fn delete_where(&self, table: Table, filters: &[(String, Value)]) -> Result<u64, AppError> {
        if filters.is_empty() {
            return Ok(0);
        }
        let mut tables = self.write()?;
        let Some(t) = tables.get_mut(table.name) else { return Ok(0) };
        let before = t.rows.len();
        t.rows.retain(|r| !matches(r, filters));
        Ok((before - t.rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MOONS: Table = Table::new("moons", "id");

    fn row(v: Value) -> Row {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids_after_explicit_ones() {
        let db = MemoryDatabase::new();
        let a = db.insert(MOONS, &row(json!({ "name": "Io" }))).await.unwrap();
        let b = db.insert(MOONS, &row(json!({ "id": 10, "name": "Europa" }))).await.unwrap();
        let c = db.insert(MOONS, &row(json!({ "name": "Ganymede" }))).await.unwrap();
        assert_eq!(a["id"], json!(1));
        assert_eq!(b["id"], json!(10));
        assert_eq!(c["id"], json!(11));
    }

    #[tokio::test]
    async fn duplicate_ids_conflict() {
        let db = MemoryDatabase::new();
        db.insert(MOONS, &row(json!({ "id": 1 }))).await.unwrap();
        let err = db.insert(MOONS, &row(json!({ "id": 1 }))).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn exhausted_id_sequence_conflicts_without_poisoning() {
        let db = MemoryDatabase::new();
        db.insert(MOONS, &row(json!({ "id": i64::MAX, "name": "Last" }))).await.unwrap();
        let err = db.insert(MOONS, &row(json!({ "name": "Next" }))).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        assert_eq!(db.select(MOONS, &[]).await.unwrap().len(), 1);
        let other = Table::new("planets", "id");
        let stored = db.insert(other, &row(json!({ "name": "Mars" }))).await.unwrap();
        assert_eq!(stored["id"], json!(1));
    }

    #[tokio::test]
    async fn update_sets_present_columns_and_keeps_id() {
        let db = MemoryDatabase::new();
        db.insert(MOONS, &row(json!({ "name": "Io", "planet_id": 5 }))).await.unwrap();
        let updated = db
            .update(MOONS, &json!(1), &row(json!({ "id": 99, "name": "Callisto" })))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated, json!({ "id": 1, "name": "Callisto", "planet_id": 5 }));
        assert!(db.update(MOONS, &json!(2), &Row::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn filters_and_deletes() {
        let db = MemoryDatabase::new();
        for (name, planet) in [("Io", 1), ("Europa", 1), ("Phobos", 2)] {
            db.insert(MOONS, &row(json!({ "name": name, "planet_id": planet }))).await.unwrap();
        }
        let jovian = db.select(MOONS, &[("planet_id".into(), json!(1))]).await.unwrap();
        assert_eq!(jovian.len(), 2);
        let picked = db.select_in(MOONS, "id", &[json!(3), json!(1)]).await.unwrap();
        assert_eq!(picked[0]["name"], json!("Io"));
        assert_eq!(picked[1]["name"], json!("Phobos"));

        assert_eq!(db.delete_where(MOONS, &[]).await.unwrap(), 0);
        assert_eq!(db.delete_where(MOONS, &[("planet_id".into(), json!(1))]).await.unwrap(), 2);
        assert!(db.delete(MOONS, &json!(3)).await.unwrap().is_some());
        assert!(db.select(MOONS, &[]).await.unwrap().is_empty());
    }
}
