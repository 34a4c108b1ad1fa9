//! Shared fixtures: a galaxy/planet/tag model set and a request helper.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header::CONTENT_LENGTH, header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use crud_scaffold::{AppState, Database, Model, Pivot};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Galaxy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

impl Model for Galaxy {
    type Id = i64;
    const NAME: &'static str = "Galaxy";
    const TABLE: &'static str = "galaxies";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub galaxy_id: Option<i64>,
}

impl Model for Planet {
    type Id = i64;
    const NAME: &'static str = "Planet";
    const TABLE: &'static str = "planets";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

/// Client-generated UUID ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
}

impl Model for Tag {
    type Id = Uuid;
    const NAME: &'static str = "Tag";
    const TABLE: &'static str = "tags";

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn generate_id() -> Option<Uuid> {
        Some(Uuid::new_v4())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub planet_id: i64,
    pub tag_id: Uuid,
}

impl Model for PlanetTag {
    type Id = i64;
    const NAME: &'static str = "PlanetTag";
    const TABLE: &'static str = "planet_tags";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl Pivot for PlanetTag {
    type Left = Planet;
    type Right = Tag;
    const LEFT_KEY: &'static str = "planet_id";
    const RIGHT_KEY: &'static str = "tag_id";

    fn link(planet: &i64, tag: &Uuid) -> Self {
        PlanetTag {
            id: None,
            planet_id: *planet,
            tag_id: *tag,
        }
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            let text = v.to_string();
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .header(CONTENT_LENGTH, text.len());
            Body::from(text)
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Rows currently stored for `M`.
pub async fn stored<M: Model>(state: &AppState) -> Vec<Value> {
    state.db().select(M::table(), &[]).await.unwrap()
}
