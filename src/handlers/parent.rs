//! Handlers for the record a child belongs to: `/<child>/:childID/<parent>`.

use super::base::{not_found, require};
use crate::db::Repo;
use crate::error::AppError;
use crate::extractors::PathParams;
use crate::model::{column, Model};
use crate::response;
use crate::state::AppState;
use axum::response::Response;

#[derive(Clone, Debug)]
pub struct ParentRoute {
    pub child_param: String,
    /// Column on the child naming its parent.
    pub foreign_key: &'static str,
}

/// Follow the child's foreign key to its parent. A null or dangling key is a 404.
async fn current_parent<C: Model, P: Model>(
    state: &AppState,
    route: &ParentRoute,
    params: &PathParams,
) -> Result<P, AppError> {
    let child_id = params.id::<C>(&route.child_param)?;
    let child = require(&Repo::<C>::new(state.db()), &child_id).await?;
    let key = column(&child, route.foreign_key)?;
    if key.is_null() {
        return Err(not_found::<P>(&format!("of {} {}", C::NAME, child_id)));
    }
    let parent_id: P::Id = serde_json::from_value(key)?;
    require(&Repo::<P>::new(state.db()), &parent_id).await
}

pub async fn index<C: Model, P: Model>(
    state: &AppState,
    route: &ParentRoute,
    params: &PathParams,
) -> Result<Response, AppError> {
    let parent = current_parent::<C, P>(state, route, params).await?;
    Ok(response::record(parent))
}

/// Replaces the parent's fields; the parent keeps its id.
pub async fn update<C: Model, P: Model>(
    state: &AppState,
    route: &ParentRoute,
    params: &PathParams,
    mut record: P,
) -> Result<Response, AppError> {
    let parent = current_parent::<C, P>(state, route, params).await?;
    let parent_id = parent
        .id()
        .ok_or_else(|| AppError::Storage(format!("stored {} has no id", P::NAME)))?;
    record.set_id(parent_id.clone());
    let updated = Repo::<P>::new(state.db())
        .update(&record)
        .await?
        .ok_or_else(|| not_found::<P>(&parent_id))?;
    Ok(response::record(updated))
}
