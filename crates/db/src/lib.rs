//! PostgreSQL engine factory for Superstore BI.
//!
//! Turns a [`ConnectionConfig`] into a connection URI and hands it to the driver. Engine
//! construction is lazy: no connection is opened until the returned pool is used.

mod error;
mod factory;
mod uri;

pub use error::{DbError, Result};
pub use factory::{get_connection, get_connection_with, EngineFactory, PgEngineFactory};
pub use superstore_kernel::ConnectionConfig;
pub use uri::{connection_uri, encoded_connection_uri, Redacted, SCHEME};
