//! Route construction: generated CRUD routes plus operational status routes.

mod bind;
pub mod crud;
pub mod status;
pub mod table;

pub use crud::{Controller, CrudRouter};
pub use status::status_routes;
pub use table::{RouteEntry, RouteTable};
