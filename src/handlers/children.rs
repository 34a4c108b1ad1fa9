//! Handlers for records owned by a parent: `/<parent>/:parentID/<child>[/:childID]`.

use super::base::{not_found, require};
use crate::db::Repo;
use crate::error::AppError;
use crate::extractors::PathParams;
use crate::model::{id_value, with_columns, Model};
use crate::response;
use crate::state::AppState;
use axum::response::Response;
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct ChildrenRoute {
    pub parent_param: String,
    pub child_param: String,
    /// Column on the child naming its parent.
    pub foreign_key: &'static str,
}

/// Resolve the parent from the path; returns its id as stored in the foreign key.
async fn parent_key<P: Model>(
    state: &AppState,
    route: &ChildrenRoute,
    params: &PathParams,
) -> Result<Value, AppError> {
    let parent_id = params.id::<P>(&route.parent_param)?;
    require(&Repo::<P>::new(state.db()), &parent_id).await?;
    id_value(&parent_id)
}

/// Child with `child_id` among the children of the parent keyed `parent`.
async fn owned_child<C: Model>(
    state: &AppState,
    route: &ChildrenRoute,
    parent: &Value,
    child_id: &C::Id,
) -> Result<C, AppError> {
    let filters = [
        (route.foreign_key.to_string(), parent.clone()),
        (C::ID_COLUMN.to_string(), id_value(child_id)?),
    ];
    Repo::<C>::new(state.db())
        .first(&filters)
        .await?
        .ok_or_else(|| not_found::<C>(child_id))
}

pub async fn index_all<P: Model, C: Model>(
    state: &AppState,
    route: &ChildrenRoute,
    params: &PathParams,
) -> Result<Response, AppError> {
    let parent = parent_key::<P>(state, route, params).await?;
    let children = Repo::<C>::new(state.db())
        .filter(&[(route.foreign_key.to_string(), parent)])
        .await?;
    Ok(response::records(children))
}

pub async fn index<P: Model, C: Model>(
    state: &AppState,
    route: &ChildrenRoute,
    params: &PathParams,
) -> Result<Response, AppError> {
    let parent = parent_key::<P>(state, route, params).await?;
    let child_id = params.id::<C>(&route.child_param)?;
    let child = owned_child::<C>(state, route, &parent, &child_id).await?;
    Ok(response::record(child))
}

pub async fn create<P: Model, C: Model>(
    state: &AppState,
    route: &ChildrenRoute,
    params: &PathParams,
    record: C,
) -> Result<Response, AppError> {
    let parent = parent_key::<P>(state, route, params).await?;
    let record = with_columns(&record, &[(route.foreign_key, parent)])?;
    let created = Repo::<C>::new(state.db()).save(&record).await?;
    Ok(response::created(created))
}

/// Replaces the child's fields; its id and parent link are kept.
pub async fn update<P: Model, C: Model>(
    state: &AppState,
    route: &ChildrenRoute,
    params: &PathParams,
    record: C,
) -> Result<Response, AppError> {
    let parent = parent_key::<P>(state, route, params).await?;
    let child_id = params.id::<C>(&route.child_param)?;
    owned_child::<C>(state, route, &parent, &child_id).await?;
    let mut record = with_columns(&record, &[(route.foreign_key, parent)])?;
    record.set_id(child_id.clone());
    let updated = Repo::<C>::new(state.db())
        .update(&record)
        .await?
        .ok_or_else(|| not_found::<C>(&child_id))?;
    Ok(response::record(updated))
}

pub async fn delete<P: Model, C: Model>(
    state: &AppState,
    route: &ChildrenRoute,
    params: &PathParams,
) -> Result<Response, AppError> {
    let parent = parent_key::<P>(state, route, params).await?;
    let child_id = params.id::<C>(&route.child_param)?;
    let child = owned_child::<C>(state, route, &parent, &child_id).await?;
    Repo::<C>::new(state.db()).delete(&child).await?;
    Ok(response::no_content())
}
