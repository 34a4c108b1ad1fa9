//! Plain resource handlers: list, read, create, update, delete.

use crate::db::Repo;
use crate::error::AppError;
use crate::extractors::PathParams;
use crate::model::Model;
use crate::response;
use crate::state::AppState;
use axum::response::Response;

/// Resolved names for a plain resource's routes.
#[derive(Clone, Debug)]
pub struct BaseRoute {
    pub id_param: String,
}

pub(crate) fn not_found<M: Model>(id: &impl std::fmt::Display) -> AppError {
    tracing::debug!(model = M::NAME, %id, "record not found");
    AppError::NotFound(format!("{} {}", M::NAME, id))
}

pub(crate) async fn require<M: Model>(repo: &Repo<'_, M>, id: &M::Id) -> Result<M, AppError> {
    repo.find(id).await?.ok_or_else(|| not_found::<M>(id))
}

pub async fn index_all<M: Model>(state: &AppState) -> Result<Response, AppError> {
    let records = Repo::<M>::new(state.db()).all().await?;
    Ok(response::records(records))
}

pub async fn index<M: Model>(
    state: &AppState,
    route: &BaseRoute,
    params: &PathParams,
) -> Result<Response, AppError> {
    let id = params.id::<M>(&route.id_param)?;
    let record = require(&Repo::<M>::new(state.db()), &id).await?;
    Ok(response::record(record))
}

pub async fn create<M: Model>(state: &AppState, record: M) -> Result<Response, AppError> {
    let created = Repo::<M>::new(state.db()).save(&record).await?;
    Ok(response::created(created))
}

/// The path id wins over any id in the body. Nothing is written when the target is missing.
pub async fn update<M: Model>(
    state: &AppState,
    route: &BaseRoute,
    params: &PathParams,
    mut record: M,
) -> Result<Response, AppError> {
    let id = params.id::<M>(&route.id_param)?;
    let repo = Repo::<M>::new(state.db());
    require(&repo, &id).await?;
    record.set_id(id.clone());
    let updated = repo.update(&record).await?.ok_or_else(|| not_found::<M>(&id))?;
    Ok(response::record(updated))
}

pub async fn delete<M: Model>(
    state: &AppState,
    route: &BaseRoute,
    params: &PathParams,
) -> Result<Response, AppError> {
    let id = params.id::<M>(&route.id_param)?;
    let repo = Repo::<M>::new(state.db());
    let record = require(&repo, &id).await?;
    repo.delete(&record).await?;
    Ok(response::no_content())
}
