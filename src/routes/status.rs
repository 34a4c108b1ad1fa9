//! Operational routes served beside the generated ones.
//!
//! Their paths (`/health`, `/ready`, `/routes`) must not collide with a model's route segment.

use super::table::{RouteEntry, RouteTable};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
struct StatusState {
    app: AppState,
    routes: Arc<[RouteEntry]>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct Readiness {
    database: &'static str,
    routes: usize,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn ready(State(status): State<StatusState>) -> (StatusCode, Json<Readiness>) {
    let routes = status.routes.len();
    match status.app.db().ping().await {
        Ok(()) => (StatusCode::OK, Json(Readiness { database: "ok", routes })),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness {
                    database: "unavailable",
                    routes,
                }),
            )
        }
    }
}

async fn routes(State(status): State<StatusState>) -> Json<Vec<RouteEntry>> {
    Json(status.routes.to_vec())
}

/// `GET /health`, `GET /ready` (pings the database) and `GET /routes` (the generated route table).
///
/// Take the table from [`CrudRouter::routes`](super::CrudRouter::routes) before
/// [`into_router`](super::CrudRouter::into_router) consumes the router.
pub fn status_routes(state: AppState, table: &RouteTable) -> Router {
    let status = StatusState {
        app: state,
        routes: table.entries().into(),
    };
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/routes", get(routes))
        .with_state(status)
}
