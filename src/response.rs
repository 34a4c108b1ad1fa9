//! `{ "data": ..., "meta": ... }` envelope shared by every generated route.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListMeta>,
}

#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub count: usize,
}

fn respond<T: Serialize>(status: StatusCode, data: T, meta: Option<ListMeta>) -> Response {
    (status, Json(Envelope { data, meta })).into_response()
}

/// One record, 200.
pub fn record<T: Serialize>(data: T) -> Response {
    respond(StatusCode::OK, data, None)
}

/// A record just stored, 201.
pub fn created<T: Serialize>(data: T) -> Response {
    respond(StatusCode::CREATED, data, None)
}

/// Every record of a collection, counted in `meta`.
pub fn records<T: Serialize>(data: Vec<T>) -> Response {
    let meta = ListMeta { count: data.len() };
    respond(StatusCode::OK, data, Some(meta))
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
