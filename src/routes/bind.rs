//! Binds each active method of a controller to its verb, path and generic handler.

use super::CrudRouter;
use crate::extractors::{JsonBody, PathParams};
use crate::handlers::{self, BaseRoute, ChildrenRoute, ParentRoute, SiblingsRoute};
use crate::methods::{BaseMethod, ChildrenMethod, MethodKind, ParentMethod, Shape, SiblingsMethod};
use crate::model::{Model, Pivot};
use crate::path::{ResourcePaths, RoutePath};
use crate::state::AppState;
use axum::extract::State;
use std::sync::Arc;

fn target(paths: &ResourcePaths, shape: Shape) -> &RoutePath {
    match shape {
        Shape::Collection => &paths.path,
        Shape::Item => &paths.id_path,
    }
}

pub(crate) fn base<M: Model>(router: &mut CrudRouter, paths: &ResourcePaths, methods: &[BaseMethod]) {
    let route = Arc::new(BaseRoute {
        id_param: paths.id_param.clone(),
    });
    for &method in methods {
        let path = target(paths, method.shape());
        let route = route.clone();
        match method {
            BaseMethod::ReadAll => router.bind(method.verb(), path, |State(state): State<AppState>| async move {
                handlers::base::index_all::<M>(&state).await
            }),
            BaseMethod::Read => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams| async move {
                    handlers::base::index::<M>(&state, &route, &params).await
                },
            ),
            BaseMethod::Create => router.bind(
                method.verb(),
                path,
                |State(state): State<AppState>, JsonBody(record): JsonBody<M>| async move {
                    handlers::base::create::<M>(&state, record).await
                },
            ),
            BaseMethod::Update => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams, JsonBody(record): JsonBody<M>| async move {
                    handlers::base::update::<M>(&state, &route, &params, record).await
                },
            ),
            BaseMethod::Delete => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams| async move {
                    handlers::base::delete::<M>(&state, &route, &params).await
                },
            ),
        }
    }
}

pub(crate) fn children<P: Model, C: Model>(
    router: &mut CrudRouter,
    paths: &ResourcePaths,
    route: ChildrenRoute,
    methods: &[ChildrenMethod],
) {
    let route = Arc::new(route);
    for &method in methods {
        let path = target(paths, method.shape());
        let route = route.clone();
        match method {
            ChildrenMethod::ReadAll => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams| async move {
                    handlers::children::index_all::<P, C>(&state, &route, &params).await
                },
            ),
            ChildrenMethod::Read => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams| async move {
                    handlers::children::index::<P, C>(&state, &route, &params).await
                },
            ),
            ChildrenMethod::Create => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams, JsonBody(record): JsonBody<C>| async move {
                    handlers::children::create::<P, C>(&state, &route, &params, record).await
                },
            ),
            ChildrenMethod::Update => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams, JsonBody(record): JsonBody<C>| async move {
                    handlers::children::update::<P, C>(&state, &route, &params, record).await
                },
            ),
            ChildrenMethod::Delete => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams| async move {
                    handlers::children::delete::<P, C>(&state, &route, &params).await
                },
            ),
        }
    }
}

pub(crate) fn parent<C: Model, P: Model>(
    router: &mut CrudRouter,
    paths: &ResourcePaths,
    route: ParentRoute,
    methods: &[ParentMethod],
) {
    let route = Arc::new(route);
    for &method in methods {
        let path = target(paths, method.shape());
        let route = route.clone();
        match method {
            ParentMethod::Read => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams| async move {
                    handlers::parent::index::<C, P>(&state, &route, &params).await
                },
            ),
            ParentMethod::Update => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams, JsonBody(record): JsonBody<P>| async move {
                    handlers::parent::update::<C, P>(&state, &route, &params, record).await
                },
            ),
        }
    }
}

pub(crate) fn siblings<B: Model, S: Model, T: Pivot>(
    router: &mut CrudRouter,
    paths: &ResourcePaths,
    route: SiblingsRoute<B, S, T>,
    methods: &[SiblingsMethod],
) {
    let route = Arc::new(route);
    for &method in methods {
        let path = target(paths, method.shape());
        let route = route.clone();
        match method {
            SiblingsMethod::ReadAll => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams| async move {
                    handlers::siblings::index_all::<B, S, T>(&state, &route, &params).await
                },
            ),
            SiblingsMethod::Read => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams| async move {
                    handlers::siblings::index::<B, S, T>(&state, &route, &params).await
                },
            ),
            SiblingsMethod::Create => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams, JsonBody(record): JsonBody<S>| async move {
                    handlers::siblings::create::<B, S, T>(&state, &route, &params, record).await
                },
            ),
            SiblingsMethod::Update => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams, JsonBody(record): JsonBody<S>| async move {
                    handlers::siblings::update::<B, S, T>(&state, &route, &params, record).await
                },
            ),
            SiblingsMethod::Delete => router.bind(
                method.verb(),
                path,
                move |State(state): State<AppState>, params: PathParams| async move {
                    handlers::siblings::delete::<B, S, T>(&state, &route, &params).await
                },
            ),
        }
    }
}
