//! Connection parameters for the Superstore BI PostgreSQL database.
//!
//! Values are layered from an optional `database.toml` and the `DB_*` environment
//! variables. Anything left unset falls back to [`DEFAULT_CONNECTION`].

use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

const ENV_PREFIX: &str = "DB";
const FILE_NAME: &str = "database.toml";

/// The only variables consulted. Names are matched exactly, case included.
const VARIABLES: [&str; 5] = ["DB_HOST", "DB_PORT", "DB_NAME", "DB_USER", "DB_PASSWORD"];

/// Fallback values for every connection field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionDefaults {
    pub host: &'static str,
    pub port: &'static str,
    pub database: &'static str,
    pub user: &'static str,
    pub password: &'static str,
}

pub const DEFAULT_CONNECTION: ConnectionDefaults = ConnectionDefaults {
    host: "localhost",
    port: "5432",
    database: "superstore_bi",
    user: "postgres",
    password: "password",
};

/// Resolved connection parameters.
///
/// Built once at startup and passed to the connection factory. `port` stays a string so
/// whatever the operator supplied reaches the URI untouched. Set-but-empty variables are
/// kept as empty strings; only missing ones fall back to the defaults.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "ConnectionConfig::default_host")]
    pub host: String,
    #[serde(default = "ConnectionConfig::default_port")]
    pub port: String,
    /// Read from `DB_NAME` / the `name` key.
    #[serde(rename = "name", default = "ConnectionConfig::default_database")]
    pub database: String,
    #[serde(default = "ConnectionConfig::default_user")]
    pub user: String,
    #[serde(default = "ConnectionConfig::default_password")]
    pub password: String,
}

impl ConnectionConfig {
    /// Load from the process environment only.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::load(None, None)
    }

    /// Load from an explicit set of variables instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::load(None, Some(vars))
    }

    /// Layer `<config_dir>/database.toml` (when present) under the `DB_*` variables.
    ///
    /// `vars` replaces the process environment when given. Either way only the exact
    /// uppercase `DB_*` names are read; `config` alone would also accept `db_host`.
    pub fn load(
        config_dir: Option<&Path>,
        vars: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let vars: config::Map<String, String> = match vars {
            Some(vars) => vars
                .into_iter()
                .filter(|(key, _)| VARIABLES.contains(&key.as_str()))
                .collect(),
            None => VARIABLES
                .iter()
                .filter_map(|name| {
                    std::env::var(name)
                        .ok()
                        .map(|value| (name.to_string(), value))
                })
                .collect(),
        };

        let mut builder = config::Config::builder();

        if let Some(dir) = config_dir {
            builder = builder.add_source(config::File::from(dir.join(FILE_NAME)).required(false));
        }

        let cfg = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
            .build()
            .with_context(|| "failed to build connection configuration")?;

        cfg.try_deserialize()
            .with_context(|| "failed to deserialize connection configuration")
    }

    fn default_host() -> String {
        DEFAULT_CONNECTION.host.to_string()
    }

    fn default_port() -> String {
        DEFAULT_CONNECTION.port.to_string()
    }

    fn default_database() -> String {
        DEFAULT_CONNECTION.database.to_string()
    }

    fn default_user() -> String {
        DEFAULT_CONNECTION.user.to_string()
    }

    fn default_password() -> String {
        DEFAULT_CONNECTION.password.to_string()
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            database: Self::default_database(),
            user: Self::default_user(),
            password: Self::default_password(),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_VARS: [(&str, &str); 0] = [];

    #[test]
    fn default_matches_constant_record() {
        let config = ConnectionConfig::default();
        assert_eq!(config.host, DEFAULT_CONNECTION.host);
        assert_eq!(config.port, DEFAULT_CONNECTION.port);
        assert_eq!(config.database, DEFAULT_CONNECTION.database);
        assert_eq!(config.user, DEFAULT_CONNECTION.user);
        assert_eq!(config.password, DEFAULT_CONNECTION.password);
    }

    #[test]
    fn no_variables_yields_defaults() {
        let config = ConnectionConfig::from_vars(NO_VARS).unwrap();
        assert_eq!(config, ConnectionConfig::default());
    }

    #[test]
    fn all_variables_override_defaults() {
        let config = ConnectionConfig::from_vars([
            ("DB_USER", "admin"),
            ("DB_PASSWORD", "secret"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_NAME", "analytics"),
        ])
        .unwrap();

        assert_eq!(config.user, "admin");
        assert_eq!(config.password, "secret");
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, "6543");
        assert_eq!(config.database, "analytics");
    }

    #[test]
    fn partial_variables_keep_remaining_defaults() {
        let config = ConnectionConfig::from_vars([("DB_HOST", "warehouse")]).unwrap();
        assert_eq!(config.host, "warehouse");
        assert_eq!(config.port, DEFAULT_CONNECTION.port);
        assert_eq!(config.database, DEFAULT_CONNECTION.database);
    }

    #[test]
    fn empty_variable_is_kept_verbatim() {
        let config = ConnectionConfig::from_vars([("DB_NAME", "")]).unwrap();
        assert_eq!(config.database, "");
    }

    #[test]
    fn variable_names_are_case_sensitive() {
        let config =
            ConnectionConfig::from_vars([("db_host", "lower"), ("Db_Name", "mixed")]).unwrap();
        assert_eq!(config.host, DEFAULT_CONNECTION.host);
        assert_eq!(config.database, DEFAULT_CONNECTION.database);
    }

    #[test]
    fn uppercase_name_wins_over_lowercase_twin() {
        let config =
            ConnectionConfig::from_vars([("db_host", "lower"), ("DB_HOST", "upper")]).unwrap();
        assert_eq!(config.host, "upper");
    }

    #[test]
    fn port_is_not_validated() {
        let config = ConnectionConfig::from_vars([("DB_PORT", "not-a-port")]).unwrap();
        assert_eq!(config.port, "not-a-port");
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        let config =
            ConnectionConfig::from_vars([("DATABASE_URL", "postgres://x"), ("DB_SCHEMA", "bi")])
                .unwrap();
        assert_eq!(config, ConnectionConfig::default());
    }

    #[test]
    fn file_values_sit_under_variables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(FILE_NAME),
            "host = \"file-host\"\nport = 7000\nname = \"file_db\"\n",
        )
        .unwrap();

        let vars: config::Map<String, String> =
            [("DB_HOST".to_string(), "env-host".to_string())].into_iter().collect();
        let config = ConnectionConfig::load(Some(dir.path()), Some(vars)).unwrap();

        assert_eq!(config.host, "env-host");
        assert_eq!(config.port, "7000");
        assert_eq!(config.database, "file_db");
        assert_eq!(config.user, DEFAULT_CONNECTION.user);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConnectionConfig::load(Some(dir.path()), Some(config::Map::new())).unwrap();
        assert_eq!(config, ConnectionConfig::default());
    }

    #[test]
    fn debug_output_masks_password() {
        let config = ConnectionConfig {
            password: "hunter2".to_string(),
            ..ConnectionConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }
}
