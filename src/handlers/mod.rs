//! Generic handlers per relation kind, written once against [`Model`](crate::model::Model).

pub mod base;
pub mod children;
pub mod parent;
pub mod siblings;

pub use base::BaseRoute;
pub use children::ChildrenRoute;
pub use parent::ParentRoute;
pub use siblings::SiblingsRoute;
