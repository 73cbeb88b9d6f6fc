//! # Rollbook Config
//!
//! Configuration types for the Rollbook service.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`server`]: TCP listen address
//! - [`database`]: SQLite connection settings
//! - [`observability`]: Log filter/format/output and the metrics exporter
//!
//! Every `from_env()` constructor falls back to a default when a variable is
//! unset or cannot be parsed. The `from_lookup()` constructors take the lookup
//! function explicitly so configuration can be built from any key/value source.
//!
//! # Example
//!
//! ```ignore
//! use rollbook_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! println!("listening on {}", config.server.bind_address());
//! ```

pub mod database;
pub mod observability;
pub mod server;

// Re-export commonly used types at crate root
pub use database::DatabaseConfig;
pub use observability::{LogFormat, LoggingConfig, MetricsConfig};
pub use server::ServerConfig;

use std::str::FromStr;

/// Complete service configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            server: ServerConfig::from_lookup(&lookup),
            database: DatabaseConfig::from_lookup(&lookup),
            logging: LoggingConfig::from_lookup(&lookup),
            metrics: MetricsConfig::from_lookup(&lookup),
        }
    }
}

/// Reads `key` through `lookup` and parses it, ignoring unparsable values.
pub(crate) fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
pub(crate) fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}
