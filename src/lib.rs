//! Superstore BI application library.
//!
//! Re-exports the connection factory and provides the zero-argument [`get_connection`]
//! used by scripts that rely on `.env` / `DB_*` configuration.

use sqlx::PgPool;

pub use superstore_db::{
    connection_uri, encoded_connection_uri, get_connection_with, DbError, EngineFactory,
    PgEngineFactory, Redacted,
};
pub use superstore_kernel::{ConnectionConfig, Settings, DEFAULT_CONNECTION};

/// Load `.env` (if present) and the `DB_*` variables, then return a lazy engine.
///
/// Driver errors are returned as-is. Must be called from within a Tokio runtime.
pub fn get_connection() -> anyhow::Result<PgPool> {
    // Allow missing `.env` files without failing.
    let _ = dotenvy::dotenv();

    let config = ConnectionConfig::from_env()?;
    Ok(superstore_db::get_connection(&config)?)
}
