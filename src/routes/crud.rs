//! Route registration entry point and relation controllers.

use super::bind;
use super::table::RouteTable;
use crate::config::{ServerConfig, DEFAULT_BODY_LIMIT};
use crate::handlers::{ChildrenRoute, ParentRoute, SiblingsRoute};
use crate::methods::{BaseMethod, ChildrenMethod, Methods, ParentMethod, SiblingsMethod, Verb};
use crate::model::{Model, Pivot};
use crate::path::{PathBuilder, ResourcePaths, RoutePath};
use crate::relation::{Children, Parent, Siblings};
use crate::state::AppState;
use axum::handler::Handler;
use axum::routing::on;
use axum::Router;
use std::marker::PhantomData;
use tower_http::limit::RequestBodyLimitLayer;

/// Collects generated CRUD routes. Registration must finish before serving;
/// binding the same verb and path twice panics (axum route overlap).
pub struct CrudRouter {
    base: RoutePath,
    router: Router<AppState>,
    table: RouteTable,
    body_limit: usize,
}

impl Default for CrudRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl CrudRouter {
    pub fn new() -> Self {
        CrudRouter {
            base: RoutePath::root(),
            router: Router::new(),
            table: RouteTable::default(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Mount every resource under literal segments, e.g. `["api", "v1"]`.
    pub fn with_base<S: AsRef<str>>(parts: &[S]) -> Self {
        CrudRouter {
            base: RoutePath::from_literals(parts),
            ..Self::new()
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new().body_limit(config.body_limit)
    }

    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Register `M`'s own routes, then let `configure` attach relation controllers.
    pub fn crud<M: Model>(
        &mut self,
        methods: Methods<BaseMethod>,
        configure: impl FnOnce(&mut Controller<'_, M>),
    ) -> &mut Self {
        let paths = PathBuilder::build(&self.base, &M::path_segment(), &M::id_param());
        bind::base::<M>(self, &paths, &methods.resolve());
        configure(&mut Controller::new(self, paths));
        self
    }

    /// All default routes for `M`, no relations.
    pub fn register<M: Model>(&mut self) -> &mut Self {
        self.crud::<M>(Methods::All, |_| {})
    }

    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    pub(crate) fn bind<H, T>(&mut self, verb: Verb, path: &RoutePath, handler: H)
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        let rendered = path.render();
        tracing::debug!(method = %verb, path = %rendered, "registering route");
        let router = std::mem::take(&mut self.router);
        self.router = router.route(&rendered, on(verb.filter(), handler));
        self.table.push(verb, rendered);
    }

    /// Finish registration and attach state.
    pub fn into_router(self, state: AppState) -> Router {
        tracing::info!(routes = self.table.len(), "crud routes registered");
        self.router
            .layer(RequestBodyLimitLayer::new(self.body_limit))
            .with_state(state)
    }
}

/// Handle on one registered resource; attaches nested relation controllers
/// under its id path. Nesting depth is unbounded and cycles are not detected.
pub struct Controller<'r, M> {
    router: &'r mut CrudRouter,
    paths: ResourcePaths,
    _model: PhantomData<fn() -> M>,
}

impl<'r, M: Model> Controller<'r, M> {
    fn new(router: &'r mut CrudRouter, paths: ResourcePaths) -> Self {
        Controller {
            router,
            paths,
            _model: PhantomData,
        }
    }

    /// Collection path (for a parent relation: the path its routes bind to).
    pub fn path(&self) -> &RoutePath {
        &self.paths.path
    }

    /// Path nested controllers are attached under.
    pub fn id_path(&self) -> &RoutePath {
        &self.paths.id_path
    }

    pub fn id_param(&self) -> &str {
        &self.paths.id_param
    }

    /// `/<self>/:selfID/<child>[/:childID]`.
    pub fn children<C: Model>(
        &mut self,
        relation: Children<M, C>,
        methods: Methods<ChildrenMethod>,
        configure: impl FnOnce(&mut Controller<'_, C>),
    ) -> &mut Self {
        let paths = PathBuilder::build(&self.paths.id_path, &C::path_segment(), &C::id_param());
        let route = ChildrenRoute {
            parent_param: self.paths.id_param.clone(),
            child_param: paths.id_param.clone(),
            foreign_key: relation.foreign_key(),
        };
        bind::children::<M, C>(&mut *self.router, &paths, route, &methods.resolve());
        configure(&mut Controller::new(&mut *self.router, paths));
        self
    }

    /// `/<self>/:selfID/<parent>`; relations nested here hang off `/<parent>/:parentID`.
    pub fn parent<P: Model>(
        &mut self,
        relation: Parent<M, P>,
        methods: Methods<ParentMethod>,
        configure: impl FnOnce(&mut Controller<'_, P>),
    ) -> &mut Self {
        let paths = PathBuilder::build(&self.paths.id_path, &P::path_segment(), &P::id_param());
        let route = ParentRoute {
            child_param: self.paths.id_param.clone(),
            foreign_key: relation.foreign_key(),
        };
        bind::parent::<M, P>(&mut *self.router, &paths, route, &methods.resolve());
        configure(&mut Controller::new(&mut *self.router, paths));
        self
    }

    /// `/<self>/:selfID/<sibling>[/:siblingID]` through pivot `T`.
    pub fn siblings<S: Model, T: Pivot>(
        &mut self,
        relation: Siblings<M, S, T>,
        methods: Methods<SiblingsMethod>,
        configure: impl FnOnce(&mut Controller<'_, S>),
    ) -> &mut Self {
        let paths = PathBuilder::build(&self.paths.id_path, &S::path_segment(), &S::id_param());
        let route = SiblingsRoute {
            base_param: self.paths.id_param.clone(),
            sibling_param: paths.id_param.clone(),
            relation,
        };
        bind::siblings::<M, S, T>(&mut *self.router, &paths, route, &methods.resolve());
        configure(&mut Controller::new(&mut *self.router, paths));
        self
    }
}
