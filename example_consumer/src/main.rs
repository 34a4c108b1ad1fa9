//! Example consumer: a separate Rust project serving a small planets API through crud-scaffold.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Uses PostgreSQL when `DATABASE_URL` is set (tables must exist), otherwise an in-memory store.

use crud_scaffold::{
    status_routes, AppState, Children, ChildrenMethod, CrudRouter, MemoryDatabase, Methods, Model, Parent, PgDatabase,
    Pivot, ServerConfig, Siblings,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Galaxy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Planet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    name: String,
    #[serde(default)]
    galaxy_id: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct PlanetTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    planet_id: i64,
    tag_id: i64,
}

macro_rules! int_model {
    ($ty:ty, $name:literal, $table:literal) => {
        impl Model for $ty {
            type Id = i64;
            const NAME: &'static str = $name;
            const TABLE: &'static str = $table;

            fn id(&self) -> Option<i64> {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = Some(id);
            }
        }
    };
}

int_model!(Galaxy, "Galaxy", "galaxies");
int_model!(Planet, "Planet", "planets");
int_model!(Tag, "Tag", "tags");
int_model!(PlanetTag, "PlanetTag", "planet_tags");

impl Pivot for PlanetTag {
    type Left = Planet;
    type Right = Tag;
    const LEFT_KEY: &'static str = "planet_id";
    const RIGHT_KEY: &'static str = "tag_id";

    fn link(planet: &i64, tag: &i64) -> Self {
        PlanetTag {
            id: None,
            planet_id: *planet,
            tag_id: *tag,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("crud_scaffold=info,example_consumer=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let state = match config.database_url.as_deref() {
        Some(_) => AppState::new(PgDatabase::connect(&config).await?),
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory store");
            AppState::new(MemoryDatabase::new())
        }
    };

    let mut crud = CrudRouter::from_config(&config);
    crud.crud::<Galaxy>(Methods::All, |galaxy| {
        galaxy.children(
            Children::<Galaxy, Planet>::new("galaxy_id"),
            Methods::except([ChildrenMethod::Delete]),
            |_| {},
        );
    });
    crud.crud::<Planet>(Methods::All, |planet| {
        planet
            .parent(Parent::<Planet, Galaxy>::new("galaxy_id"), Methods::All, |_| {})
            .siblings(Siblings::<Planet, Tag, PlanetTag>::left(), Methods::All, |_| {});
    });
    crud.crud::<Tag>(Methods::All, |tag| {
        tag.siblings(Siblings::<Tag, Planet, PlanetTag>::right(), Methods::All, |_| {});
    });
    for route in crud.routes().entries() {
        tracing::info!(method = %route.verb, path = %route.path, "route");
    }

    let status = status_routes(state.clone(), crud.routes());
    let app = status.merge(crud.into_router(state));
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Example consumer listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
