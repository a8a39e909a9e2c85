pub mod connection;
pub mod settings;

pub use connection::{ConnectionConfig, ConnectionDefaults, DEFAULT_CONNECTION};
pub use settings::{Environment, LogFormat, Settings, TelemetrySettings};
