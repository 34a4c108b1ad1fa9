//! Request extractors whose rejections surface as [`AppError`](crate::error::AppError).

pub mod body;
pub mod params;

pub use body::JsonBody;
pub use params::PathParams;
