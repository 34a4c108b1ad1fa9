//! Named path parameters of the matched route.

use crate::error::AppError;
use crate::model::{parse_id, Model};
use async_trait::async_trait;
use axum::{
    extract::{rejection::PathRejection, FromRequestParts, Path},
    http::request::Parts,
};
use std::collections::HashMap;

/// Every `:param` of the matched route by name. Routes without params yield an empty map.
#[derive(Clone, Debug, Default)]
pub struct PathParams(pub HashMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Parse the param `name` as an id of `M`.
    pub fn id<M: Model>(&self, name: &str) -> Result<M::Id, AppError> {
        let raw = self
            .get(name)
            .ok_or_else(|| AppError::BadRequest(format!("missing path parameter '{}'", name)))?;
        parse_id::<M>(raw)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PathParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<HashMap<String, String>>::from_request_parts(parts, state).await {
            Ok(Path(params)) => Ok(PathParams(params)),
            Err(PathRejection::MissingPathParams(_)) => Ok(PathParams::default()),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}
