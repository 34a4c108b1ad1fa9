//! Crud scaffold: model-driven CRUD route registration for axum, with nested
//! children, parent and sibling (pivot) relation controllers.

pub mod case;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod methods;
pub mod model;
pub mod path;
pub mod relation;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;

pub use config::ServerConfig;
pub use db::{Database, MemoryDatabase, PgDatabase, Repo, Row, Table};
pub use error::{AppError, ConfigError};
pub use methods::{BaseMethod, ChildrenMethod, MethodKind, Methods, ParentMethod, SiblingsMethod, Verb};
pub use model::{Model, Pivot};
pub use path::{PathBuilder, RoutePath};
pub use relation::{Children, Parent, PivotSide, SiblingDelete, Siblings};
pub use response::{Envelope, ListMeta};
pub use routes::{status_routes, Controller, CrudRouter, RouteEntry, RouteTable};
pub use state::AppState;
