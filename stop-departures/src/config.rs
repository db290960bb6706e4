//! Service configuration, read from the environment.

use std::net::SocketAddr;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::source::NexTripConfig;

/// Default stops table.
const DEFAULT_STOPS_TABLE: &str = "mt.stops";

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable is set but cannot be used
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Connection settings for the stops database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub ssl_mode: PgSslMode,
    /// Stops table, optionally schema-qualified.
    pub stops_table: String,
    /// Pool size
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Create a config; every field must be non-empty.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            database: database.into(),
            ssl_mode: PgSslMode::Disable,
            stops_table: DEFAULT_STOPS_TABLE.to_string(),
            max_connections: 5,
        };

        for (name, value) in [
            ("PG_HOST", &config.host),
            ("PG_USER", &config.user),
            ("PG_PASSWORD", &config.password),
            ("PG_DATABASE", &config.database),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Missing(name));
            }
        }

        Ok(config)
    }

    /// Set the SSL mode.
    pub fn with_ssl_mode(mut self, mode: PgSslMode) -> Self {
        self.ssl_mode = mode;
        self
    }

    /// Set the stops table.
    ///
    /// The name is spliced into SQL, so only ASCII letters, digits, `_` and
    /// `.` are accepted.
    pub fn with_stops_table(mut self, table: impl Into<String>) -> Result<Self, ConfigError> {
        let table = table.into();
        validate_table_name(&table)?;
        self.stops_table = table;
        Ok(self)
    }

    /// Set the pool size.
    pub fn with_max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    /// Connection options for sqlx.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(self.ssl_mode)
    }
}

fn validate_table_name(table: &str) -> Result<(), ConfigError> {
    let well_formed = !table.is_empty()
        && table.split('.').all(|part| {
            !part.is_empty()
                && !part.starts_with(|c: char| c.is_ascii_digit())
                && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if well_formed {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name: "STOPS_TABLE",
            reason: format!("{table:?} is not a plain or schema-qualified identifier"),
        })
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub nextrip: NexTripConfig,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port = parse::<u16>("PG_PORT", &require("PG_PORT")?)?;

        let mut database = DatabaseConfig::new(
            require("PG_HOST")?,
            port,
            require("PG_USER")?,
            require("PG_PASSWORD")?,
            require("PG_DATABASE")?,
        )?;

        if let Some(mode) = get("PG_SSLMODE") {
            database = database.with_ssl_mode(parse("PG_SSLMODE", &mode)?);
        }
        if let Some(table) = get("STOPS_TABLE") {
            database = database.with_stops_table(table)?;
        }
        if let Some(n) = get("PG_MAX_CONNECTIONS") {
            database = database.with_max_connections(parse("PG_MAX_CONNECTIONS", &n)?);
        }

        let mut nextrip = NexTripConfig::default();
        if let Some(url) = get("NEXTRIP_BASE_URL") {
            nextrip = nextrip.with_base_url(url);
        }
        if let Some(secs) = get("NEXTRIP_TIMEOUT_SECS") {
            nextrip = nextrip.with_timeout(parse("NEXTRIP_TIMEOUT_SECS", &secs)?);
        }

        let bind_addr = parse(
            "BIND_ADDR",
            &get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        Ok(Self {
            database,
            nextrip,
            bind_addr,
        })
    }
}

fn parse<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("PG_HOST", "db.internal"),
        ("PG_PORT", "5432"),
        ("PG_USER", "metro"),
        ("PG_PASSWORD", "secret"),
        ("PG_DATABASE", "gtfs"),
    ];

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(env(REQUIRED)).unwrap();

        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.stops_table, "mt.stops");
        assert!(matches!(config.database.ssl_mode, PgSslMode::Disable));
        assert_eq!(config.nextrip, NexTripConfig::default());
        assert_eq!(
            config.bind_addr,
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("PG_SSLMODE", "require"),
            ("STOPS_TABLE", "public.stops"),
            ("NEXTRIP_BASE_URL", "http://localhost:9000/NexTrip"),
            ("NEXTRIP_TIMEOUT_SECS", "3"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("PG_MAX_CONNECTIONS", "12"),
        ]);

        let config = AppConfig::from_lookup(env(&pairs)).unwrap();

        assert!(matches!(config.database.ssl_mode, PgSslMode::Require));
        assert_eq!(config.database.stops_table, "public.stops");
        assert_eq!(config.nextrip.base_url, "http://localhost:9000/NexTrip");
        assert_eq!(config.nextrip.timeout_secs, 3);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database.max_connections, 12);
    }

    #[test]
    fn every_connection_field_is_required() {
        for &(missing, _) in REQUIRED {
            let pairs: Vec<_> = REQUIRED
                .iter()
                .copied()
                .filter(|(k, _)| *k != missing)
                .collect();

            let err = AppConfig::from_lookup(env(&pairs)).unwrap_err();
            assert_eq!(err, ConfigError::Missing(missing));
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs.retain(|(k, _)| *k != "PG_PASSWORD");
        pairs.push(("PG_PASSWORD", ""));

        let err = AppConfig::from_lookup(env(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("PG_PASSWORD"));
        assert_eq!(err.to_string(), "PG_PASSWORD must be set");
    }

    #[test]
    fn bad_port_is_invalid() {
        let mut pairs = REQUIRED.to_vec();
        pairs.retain(|(k, _)| *k != "PG_PORT");
        pairs.push(("PG_PORT", "postgres"));

        let err = AppConfig::from_lookup(env(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PG_PORT", .. }));
    }

    #[test]
    fn table_names_are_validated() {
        let base = DatabaseConfig::new("h", 5432, "u", "p", "d").unwrap();

        assert!(base.clone().with_stops_table("stops").is_ok());
        assert!(base.clone().with_stops_table("mt.stops").is_ok());
        assert!(base.clone().with_stops_table("gtfs_2024.stops_v2").is_ok());

        for bad in ["", "mt.", ".stops", "stops; DROP TABLE x", "1stops", "mt.stops--"] {
            assert!(
                base.clone().with_stops_table(bad).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn connect_options_carry_fields() {
        let config = DatabaseConfig::new("db.internal", 6543, "metro", "secret", "gtfs").unwrap();
        let options = config.connect_options();

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "metro");
        assert_eq!(options.get_database(), Some("gtfs"));
    }
}
