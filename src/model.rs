//! Capabilities a record type needs before routes can be generated for it.

use crate::case::{to_camel_case, to_snake_case};
use crate::db::{Row, Table};
use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// A persisted record with a unique identifier.
///
/// Records travel to and from storage as JSON objects, so the serde
/// representation must be a map whose keys are the table's column names.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Identifier type; parsed from path segments.
    type Id: FromStr
        + Serialize
        + DeserializeOwned
        + Clone
        + PartialEq
        + Debug
        + Display
        + Send
        + Sync
        + 'static;

    /// Resource type name, e.g. `"Planet"`.
    const NAME: &'static str;
    /// Storage table.
    const TABLE: &'static str;
    const ID_COLUMN: &'static str = "id";

    fn id(&self) -> Option<Self::Id>;

    fn set_id(&mut self, id: Self::Id);

    /// Client-side id for new records. `None` leaves assignment to storage.
    fn generate_id() -> Option<Self::Id> {
        None
    }

    /// Route segment for this resource (`Planet` -> `planet`).
    fn path_segment() -> String {
        to_snake_case(Self::NAME)
    }

    /// Path parameter naming this resource's id (`planet` -> `planetID`).
    fn id_param() -> String {
        format!("{}ID", to_camel_case(&Self::path_segment()))
    }

    fn table() -> Table {
        Table::new(Self::TABLE, Self::ID_COLUMN)
    }
}

/// Join record of a many-to-many association between `Left` and `Right`.
pub trait Pivot: Model {
    type Left: Model;
    type Right: Model;

    /// Column holding the left record's id.
    const LEFT_KEY: &'static str;
    /// Column holding the right record's id.
    const RIGHT_KEY: &'static str;

    fn link(left: &<Self::Left as Model>::Id, right: &<Self::Right as Model>::Id) -> Self;
}

pub fn id_value<I: Serialize>(id: &I) -> Result<Value, AppError> {
    Ok(serde_json::to_value(id)?)
}

pub fn to_row<M: Model>(record: &M) -> Result<Row, AppError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Storage(format!(
            "{} must serialize to a JSON object, got {}",
            M::NAME,
            other
        ))),
    }
}

pub fn from_row<M: Model>(row: Value) -> Result<M, AppError> {
    Ok(serde_json::from_value(row)?)
}

/// Overwrite columns on a record by round-tripping it through its row form.
pub fn with_columns<M: Model>(record: &M, columns: &[(&str, Value)]) -> Result<M, AppError> {
    let mut row = to_row(record)?;
    for (name, value) in columns {
        row.insert((*name).to_string(), value.clone());
    }
    from_row(Value::Object(row))
}

/// Read one column of a record.
pub fn column<M: Model>(record: &M, name: &str) -> Result<Value, AppError> {
    let row = to_row(record)?;
    Ok(row.get(name).cloned().unwrap_or(Value::Null))
}

/// Parse a path segment into a model id.
pub fn parse_id<M: Model>(raw: &str) -> Result<M::Id, AppError> {
    raw.parse::<M::Id>()
        .map_err(|_| AppError::BadRequest(format!("invalid {} id '{}'", M::NAME, raw)))
}
