//! PostgreSQL backend over a sqlx pool.

use super::{Database, Row, Table};
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgDatabase {
    pool: PgPool,
    schema: String,
}

impl PgDatabase {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgDatabase {
            pool,
            schema: schema.into(),
        }
    }

    /// Connect using `database_url`, `db_max_connections` and `db_schema` from config.
    pub async fn connect(config: &ServerConfig) -> Result<Self, AppError> {
        let url = config
            .database_url
            .as_deref()
            .ok_or_else(|| AppError::Storage("DATABASE_URL is not set".into()))?;
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool, config.db_schema.clone()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<sqlx::Postgres, Value>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<sqlx::Postgres, Value>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query::<sqlx::Postgres>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl Database for PgDatabase {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn find(&self, table: Table, id: &Value) -> Result<Option<Value>, AppError> {
        let q = sql::select_by_id(&self.schema, table, id);
        self.fetch_optional(&q).await
    }

    async fn select(&self, table: Table, filters: &[(String, Value)]) -> Result<Vec<Value>, AppError> {
        let q = sql::select_list(&self.schema, table, filters);
        self.fetch_all(&q).await
    }

    async fn select_in(&self, table: Table, column: &str, values: &[Value]) -> Result<Vec<Value>, AppError> {
        if values.is_empty() {
            return Ok(Vec::new());
        }
        let q = sql::select_by_column_in(&self.schema, table, column, values);
        self.fetch_all(&q).await
    }

    async fn insert(&self, table: Table, row: &Row) -> Result<Value, AppError> {
        let q = sql::insert(&self.schema, table, row);
        self.fetch_optional(&q)
            .await?
            .ok_or_else(|| AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn update(&self, table: Table, id: &Value, row: &Row) -> Result<Option<Value>, AppError> {
        let q = sql::update(&self.schema, table, id, row);
        self.fetch_optional(&q).await
    }

    async fn delete(&self, table: Table, id: &Value) -> Result<Option<Value>, AppError> {
        let q = sql::delete(&self.schema, table, id);
        self.fetch_optional(&q).await
    }

    async fn delete_where(&self, table: Table, filters: &[(String, Value)]) -> Result<u64, AppError> {
        if filters.is_empty() {
            return Ok(0);
        }
        let q = sql::delete_where(&self.schema, table, filters);
        self.execute(&q).await
    }
}
