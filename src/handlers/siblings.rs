//! Handlers for many-to-many relations through a pivot: `/<base>/:baseID/<sibling>[/:siblingID]`.

use super::base::{not_found, require};
use crate::db::Repo;
use crate::error::AppError;
use crate::extractors::PathParams;
use crate::model::{id_value, Model, Pivot};
use crate::relation::{SiblingDelete, Siblings};
use crate::response;
use crate::state::AppState;
use axum::response::Response;
use serde_json::Value;

pub struct SiblingsRoute<B: Model, S: Model, T> {
    pub base_param: String,
    pub sibling_param: String,
    pub relation: Siblings<B, S, T>,
}

impl<B: Model, S: Model, T: Pivot> SiblingsRoute<B, S, T> {
    fn base_filter(&self, base: &Value) -> Vec<(String, Value)> {
        vec![(self.relation.base_key().to_string(), base.clone())]
    }
}

/// Base id from the path, after checking the base record exists.
async fn resolve_base<B: Model, S: Model, T: Pivot>(
    state: &AppState,
    route: &SiblingsRoute<B, S, T>,
    params: &PathParams,
) -> Result<B::Id, AppError> {
    let base_id = params.id::<B>(&route.base_param)?;
    require(&Repo::<B>::new(state.db()), &base_id).await?;
    Ok(base_id)
}

/// Sibling ids joined to `base`, in pivot order, without repeats.
async fn attached_ids<B: Model, S: Model, T: Pivot>(
    state: &AppState,
    route: &SiblingsRoute<B, S, T>,
    base: &Value,
) -> Result<Vec<Value>, AppError> {
    let pivots = state.db().select(T::table(), &route.base_filter(base)).await?;
    let mut ids: Vec<Value> = Vec::with_capacity(pivots.len());
    for pivot in pivots {
        let Some(id) = pivot.get(route.relation.sibling_key()).filter(|v| !v.is_null()) else {
            continue;
        };
        if !ids.contains(id) {
            ids.push(id.clone());
        }
    }
    Ok(ids)
}

/// Sibling `id` if it is attached to `base`.
async fn attached_sibling<B: Model, S: Model, T: Pivot>(
    state: &AppState,
    route: &SiblingsRoute<B, S, T>,
    base: &Value,
    id: &S::Id,
) -> Result<S, AppError> {
    let wanted = id_value(id)?;
    if !attached_ids(state, route, base).await?.contains(&wanted) {
        return Err(not_found::<S>(id));
    }
    require(&Repo::<S>::new(state.db()), id).await
}

pub async fn index_all<B: Model, S: Model, T: Pivot>(
    state: &AppState,
    route: &SiblingsRoute<B, S, T>,
    params: &PathParams,
) -> Result<Response, AppError> {
    let base = id_value(&resolve_base(state, route, params).await?)?;
    let ids = attached_ids(state, route, &base).await?;
    let siblings = Repo::<S>::new(state.db()).filter_in(S::ID_COLUMN, &ids).await?;
    Ok(response::records(siblings))
}

pub async fn index<B: Model, S: Model, T: Pivot>(
    state: &AppState,
    route: &SiblingsRoute<B, S, T>,
    params: &PathParams,
) -> Result<Response, AppError> {
    let base = id_value(&resolve_base(state, route, params).await?)?;
    let sibling_id = params.id::<S>(&route.sibling_param)?;
    let sibling = attached_sibling(state, route, &base, &sibling_id).await?;
    Ok(response::record(sibling))
}

/// Attach a sibling. A body naming an existing record only adds the join row;
/// otherwise the record is created first. Attaching twice is a no-op.
pub async fn create<B: Model, S: Model, T: Pivot>(
    state: &AppState,
    route: &SiblingsRoute<B, S, T>,
    params: &PathParams,
    record: S,
) -> Result<Response, AppError> {
    let base_id = resolve_base(state, route, params).await?;
    let base = id_value(&base_id)?;
    let siblings = Repo::<S>::new(state.db());
    let existing = match record.id() {
        Some(id) => siblings.find(&id).await?,
        None => None,
    };
    let sibling = match existing {
        Some(found) => found,
        None => siblings.save(&record).await?,
    };
    let sibling_id = sibling
        .id()
        .ok_or_else(|| AppError::Storage(format!("stored {} has no id", S::NAME)))?;
    if !attached_ids(state, route, &base).await?.contains(&id_value(&sibling_id)?) {
        let pivot = route.relation.link(&base_id, &sibling_id);
        Repo::<T>::new(state.db()).save(&pivot).await?;
        tracing::debug!(base = B::NAME, sibling = S::NAME, side = ?route.relation.side(), "attached sibling");
    }
    Ok(response::created(sibling))
}

pub async fn update<B: Model, S: Model, T: Pivot>(
    state: &AppState,
    route: &SiblingsRoute<B, S, T>,
    params: &PathParams,
    mut record: S,
) -> Result<Response, AppError> {
    let base = id_value(&resolve_base(state, route, params).await?)?;
    let sibling_id = params.id::<S>(&route.sibling_param)?;
    attached_sibling(state, route, &base, &sibling_id).await?;
    record.set_id(sibling_id.clone());
    let updated = Repo::<S>::new(state.db())
        .update(&record)
        .await?
        .ok_or_else(|| not_found::<S>(&sibling_id))?;
    Ok(response::record(updated))
}

/// Delete one sibling, chosen by the relation's [`SiblingDelete`] policy, with all its pivot rows.
pub async fn delete<B: Model, S: Model, T: Pivot>(
    state: &AppState,
    route: &SiblingsRoute<B, S, T>,
    params: &PathParams,
) -> Result<Response, AppError> {
    let base = id_value(&resolve_base(state, route, params).await?)?;
    let requested_id = params.id::<S>(&route.sibling_param)?;
    let requested = id_value(&requested_id)?;
    let attached = attached_ids(state, route, &base).await?;
    let target = match route.relation.delete_policy() {
        SiblingDelete::FirstAttached => attached.first(),
        SiblingDelete::ById => attached.iter().find(|id| **id == requested),
    }
    .cloned()
    .ok_or_else(|| not_found::<S>(&requested_id))?;
    if target != requested {
        tracing::warn!(
            sibling = S::NAME,
            requested = %requested,
            deleted = %target,
            "sibling delete removed the first attached record, not the requested one"
        );
    }
    // Links from every base, not only this one; none may outlive the record.
    let links = [(route.relation.sibling_key().to_string(), target.clone())];
    let detached = Repo::<T>::new(state.db()).delete_where(&links).await?;
    tracing::debug!(sibling = S::NAME, id = %target, links = detached, "detached sibling");
    state.db().delete(S::table(), &target).await?;
    Ok(response::no_content())
}
