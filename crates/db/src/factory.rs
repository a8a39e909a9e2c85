use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::Result;
use crate::uri::connection_uri;
use superstore_kernel::ConnectionConfig;

/// Builds an engine handle from a connection URI.
pub trait EngineFactory {
    type Engine;

    fn create_engine(&self, uri: &str) -> Result<Self::Engine>;
}

/// Lazily-connecting sqlx pool with the driver's default options.
///
/// Must be called from within a Tokio runtime; the pool spawns its maintenance task there.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgEngineFactory;

impl EngineFactory for PgEngineFactory {
    type Engine = PgPool;

    fn create_engine(&self, uri: &str) -> Result<PgPool> {
        Ok(PgPoolOptions::new().connect_lazy(uri)?)
    }
}

/// Build the URI for `config` and hand it to `factory` once.
pub fn get_connection_with<F: EngineFactory>(
    config: &ConnectionConfig,
    factory: &F,
) -> Result<F::Engine> {
    factory.create_engine(&connection_uri(config))
}

/// Return a lazy PostgreSQL pool for `config`.
///
/// No connection is attempted here. Authentication and reachability failures show up the
/// first time the pool is used.
pub fn get_connection(config: &ConnectionConfig) -> Result<PgPool> {
    get_connection_with(config, &PgEngineFactory)
}
