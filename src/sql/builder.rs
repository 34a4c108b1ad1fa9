//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for a table.
//!
//! Values never appear in SQL text. They are bound as one JSONB object (or array of
//! objects) and expanded with `jsonb_populate_record(NULL::table, $n)`, which types each
//! column from the table definition. Rows come back as `to_jsonb(t)`.

use crate::db::{Row, Table};
use serde_json::{Map, Value};

/// Quote identifier for PostgreSQL (safe: only from model metadata).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

const ALIAS: &str = "t";

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

fn record_of(pairs: &[(String, Value)]) -> Value {
    let map: Map<String, Value> = pairs.iter().cloned().collect();
    Value::Object(map)
}

/// `jsonb_populate_record(NULL::<table>, $n)` for a bound object.
fn populate(table: &str, param_num: u32) -> String {
    format!("jsonb_populate_record(NULL::{}, ${})", table, param_num)
}

/// `t."id" = (jsonb_populate_record(...))."id"` with the id bound as a new param.
fn id_predicate(q: &mut QueryBuf, qualified: &str, table: Table, id: &Value) -> String {
    let n = q.push_param(record_of(&[(table.id_column.to_string(), id.clone())]));
    format!(
        "{}.{} = ({}).{}",
        ALIAS,
        quoted(table.id_column),
        populate(qualified, n),
        quoted(table.id_column)
    )
}

/// SELECT by primary key.
pub fn select_by_id(schema: &str, table: Table, id: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let qualified = qualified_table(schema, table.name);
    let pred = id_predicate(&mut q, &qualified, table, id);
    q.sql = format!(
        "SELECT to_jsonb({a}) FROM {} AS {a} WHERE {}",
        qualified,
        pred,
        a = ALIAS
    );
    q
}

/// SELECT list with optional exact-match filters, ORDER BY pk.
pub fn select_list(schema: &str, table: Table, filters: &[(String, Value)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let qualified = qualified_table(schema, table.name);
    let order_clause = format!(" ORDER BY {}.{}", ALIAS, quoted(table.id_column));
    if filters.is_empty() {
        q.sql = format!("SELECT to_jsonb({a}) FROM {} AS {a}{}", qualified, order_clause, a = ALIAS);
        return q;
    }
    let n = q.push_param(record_of(filters));
    let where_parts: Vec<String> = filters
        .iter()
        .map(|(col, _)| format!("{}.{c} = f.{c}", ALIAS, c = quoted(col)))
        .collect();
    q.sql = format!(
        "SELECT to_jsonb({a}) FROM {} AS {a}, {} AS f WHERE {}{}",
        qualified,
        populate(&qualified, n),
        where_parts.join(" AND "),
        order_clause,
        a = ALIAS
    );
    q
}

/// SELECT rows whose column is one of `values`, ORDER BY pk.
pub fn select_by_column_in(schema: &str, table: Table, column: &str, values: &[Value]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let qualified = qualified_table(schema, table.name);
    if values.is_empty() {
        q.sql = format!("SELECT to_jsonb({a}) FROM {} AS {a} WHERE 1 = 0", qualified, a = ALIAS);
        return q;
    }
    let records: Vec<Value> = values
        .iter()
        .map(|v| record_of(&[(column.to_string(), v.clone())]))
        .collect();
    let n = q.push_param(Value::Array(records));
    q.sql = format!(
        "SELECT to_jsonb({a}) FROM {} AS {a} WHERE {a}.{c} IN (SELECT r.{c} FROM jsonb_populate_recordset(NULL::{}, ${}) AS r) ORDER BY {a}.{}",
        qualified,
        qualified,
        n,
        quoted(table.id_column),
        a = ALIAS,
        c = quoted(column)
    );
    q
}

/// INSERT only the columns present in `row`; the rest take their DB default.
pub fn insert(schema: &str, table: Table, row: &Row) -> QueryBuf {
    let mut q = QueryBuf::new();
    let qualified = qualified_table(schema, table.name);
    if row.is_empty() {
        q.sql = format!(
            "INSERT INTO {} AS {a} DEFAULT VALUES RETURNING to_jsonb({a})",
            qualified,
            a = ALIAS
        );
        return q;
    }
    let cols: Vec<String> = row.keys().map(|k| quoted(k)).collect();
    let picks: Vec<String> = row.keys().map(|k| format!("r.{}", quoted(k))).collect();
    let n = q.push_param(Value::Object(row.clone()));
    q.sql = format!(
        "INSERT INTO {} AS {a} ({}) SELECT {} FROM {} AS r RETURNING to_jsonb({a})",
        qualified,
        cols.join(", "),
        picks.join(", "),
        populate(&qualified, n),
        a = ALIAS
    );
    q
}

/// UPDATE by id: SET only columns present in `row`, never the pk.
/// With nothing to set this degrades to a SELECT by id so callers still see existence.
pub fn update(schema: &str, table: Table, id: &Value, row: &Row) -> QueryBuf {
    let sets: Vec<String> = row
        .keys()
        .filter(|k| k.as_str() != table.id_column)
        .map(|k| format!("{c} = r.{c}", c = quoted(k)))
        .collect();
    if sets.is_empty() {
        return select_by_id(schema, table, id);
    }
    let mut q = QueryBuf::new();
    let qualified = qualified_table(schema, table.name);
    let n = q.push_param(Value::Object(row.clone()));
    let pred = id_predicate(&mut q, &qualified, table, id);
    q.sql = format!(
        "UPDATE {} AS {a} SET {} FROM {} AS r WHERE {} RETURNING to_jsonb({a})",
        qualified,
        sets.join(", "),
        populate(&qualified, n),
        pred,
        a = ALIAS
    );
    q
}

/// DELETE by id.
pub fn delete(schema: &str, table: Table, id: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let qualified = qualified_table(schema, table.name);
    let pred = id_predicate(&mut q, &qualified, table, id);
    q.sql = format!(
        "DELETE FROM {} AS {a} WHERE {} RETURNING to_jsonb({a})",
        qualified,
        pred,
        a = ALIAS
    );
    q
}

/// DELETE every row matching all filters. Callers must not pass an empty filter list.
pub fn delete_where(schema: &str, table: Table, filters: &[(String, Value)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let qualified = qualified_table(schema, table.name);
    let n = q.push_param(record_of(filters));
    let where_parts: Vec<String> = filters
        .iter()
        .map(|(col, _)| format!("{}.{c} = f.{c}", ALIAS, c = quoted(col)))
        .collect();
    q.sql = format!(
        "DELETE FROM {} AS {a} USING {} AS f WHERE {}",
        qualified,
        populate(&qualified, n),
        where_parts.join(" AND "),
        a = ALIAS
    );
    q
}
