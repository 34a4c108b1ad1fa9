//! Typed façade over [`Database`] for one model.

use super::{Database, Row};
use crate::error::AppError;
use crate::model::{from_row, id_value, to_row, Model};
use serde_json::Value;
use std::marker::PhantomData;

pub struct Repo<'a, M> {
    db: &'a dyn Database,
    _model: PhantomData<fn() -> M>,
}

impl<'a, M: Model> Repo<'a, M> {
    pub fn new(db: &'a dyn Database) -> Self {
        Repo {
            db,
            _model: PhantomData,
        }
    }

    pub async fn find(&self, id: &M::Id) -> Result<Option<M>, AppError> {
        let id = id_value(id)?;
        self.db
            .find(M::table(), &id)
            .await?
            .map(from_row::<M>)
            .transpose()
    }

    pub async fn all(&self) -> Result<Vec<M>, AppError> {
        self.filter(&[]).await
    }

    pub async fn filter(&self, filters: &[(String, Value)]) -> Result<Vec<M>, AppError> {
        self.db
            .select(M::table(), filters)
            .await?
            .into_iter()
            .map(from_row::<M>)
            .collect()
    }

    pub async fn first(&self, filters: &[(String, Value)]) -> Result<Option<M>, AppError> {
        Ok(self.filter(filters).await?.into_iter().next())
    }

    pub async fn filter_in(&self, column: &str, values: &[Value]) -> Result<Vec<M>, AppError> {
        self.db
            .select_in(M::table(), column, values)
            .await?
            .into_iter()
            .map(from_row::<M>)
            .collect()
    }

    /// Insert a new record. A missing id is filled from [`Model::generate_id`] or left to storage.
    pub async fn save(&self, record: &M) -> Result<M, AppError> {
        let mut record = record.clone();
        if record.id().is_none() {
            if let Some(id) = M::generate_id() {
                record.set_id(id);
            }
        }
        let row = Self::storable(&record)?;
        let stored = self.db.insert(M::table(), &row).await?;
        from_row(stored)
    }

    /// Replace the stored record with the same id. `None` when it does not exist.
    pub async fn update(&self, record: &M) -> Result<Option<M>, AppError> {
        let id = record
            .id()
            .ok_or_else(|| AppError::BadRequest(format!("{} update requires an id", M::NAME)))?;
        let id = id_value(&id)?;
        let row = Self::storable(record)?;
        self.db
            .update(M::table(), &id, &row)
            .await?
            .map(from_row::<M>)
            .transpose()
    }

    /// Delete the stored record with the same id. `None` when it does not exist.
    pub async fn delete(&self, record: &M) -> Result<Option<M>, AppError> {
        let id = record
            .id()
            .ok_or_else(|| AppError::BadRequest(format!("{} delete requires an id", M::NAME)))?;
        let id = id_value(&id)?;
        self.db
            .delete(M::table(), &id)
            .await?
            .map(from_row::<M>)
            .transpose()
    }

    pub async fn delete_where(&self, filters: &[(String, Value)]) -> Result<u64, AppError> {
        self.db.delete_where(M::table(), filters).await
    }

    /// Row form without a null id, so storage can assign one.
    fn storable(record: &M) -> Result<Row, AppError> {
        let mut row = to_row(record)?;
        if row.get(M::ID_COLUMN).map(Value::is_null).unwrap_or(false) {
            row.remove(M::ID_COLUMN);
        }
        Ok(row)
    }
}
