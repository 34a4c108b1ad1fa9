//! Server configuration from environment variables (a `.env` file is honored).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// `DATABASE_URL`. Unset means the in-memory database.
    pub database_url: Option<String>,
    /// `BIND_ADDR`, default `0.0.0.0:3000`.
    pub bind_addr: SocketAddr,
    /// `DB_MAX_CONNECTIONS`, default 5.
    pub db_max_connections: u32,
    /// `DB_SCHEMA`, default `public`.
    pub db_schema: String,
    /// `BODY_LIMIT_BYTES`, default 1 MiB.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            database_url: None,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            db_max_connections: 5,
            db_schema: "public".into(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Load `.env` if present, then read the process environment.
    /// A `.env` that exists but does not parse is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        env_file_loaded(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        let bind_addr = match lookup("BIND_ADDR") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue { key: "BIND_ADDR", value: v })?,
            None => defaults.bind_addr,
        };
        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => match v.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidValue { key: "DB_MAX_CONNECTIONS", value: v }),
            },
            None => defaults.db_max_connections,
        };
        let db_schema = lookup("DB_SCHEMA").unwrap_or(defaults.db_schema);
        if db_schema.is_empty() {
            return Err(ConfigError::InvalidValue { key: "DB_SCHEMA", value: db_schema });
        }
        let body_limit = match lookup("BODY_LIMIT_BYTES") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "BODY_LIMIT_BYTES", value: v })?,
            None => defaults.body_limit,
        };
        Ok(ServerConfig {
            database_url,
            bind_addr,
            db_max_connections,
            db_schema,
            body_limit,
        })
    }
}

fn env_file_loaded<T>(result: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::Load(e.to_string())),
    }
}
