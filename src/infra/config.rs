//! Centralized configuration (environment variables + defaults).

use std::str::FromStr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Which `CafeStore` backend to run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub store: StoreBackend,
    pub max_connections: u32,
    /// Shared secret required by `DELETE /report-closed/{id}`.
    pub api_key: String,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("CAFE_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("CAFE_API_KEY"))?;

        let store = match lookup("CAFE_STORE").as_deref().unwrap_or("postgres") {
            "postgres" => {
                let database_url =
                    lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
                StoreBackend::Postgres { database_url }
            }
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "CAFE_STORE",
                    value: other.to_string(),
                    reason: "expected 'postgres' or 'memory'".to_string(),
                })
            }
        };

        let max_connections =
            parse_or("DB_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?.max(1);
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            bind_addr,
            store,
            max_connections,
            api_key,
        })
    }
}

fn parse_or<T, F>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_to_postgres_store() {
        let config = Config::from_lookup(lookup_from(&[
            ("CAFE_API_KEY", "secret"),
            ("DATABASE_URL", "postgres://localhost/cafes"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.api_key, "secret");
        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/cafes".to_string()
            }
        );
    }

    #[test]
    fn api_key_is_required() {
        let err = Config::from_lookup(lookup_from(&[("CAFE_STORE", "memory")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("CAFE_API_KEY")));

        let err = Config::from_lookup(lookup_from(&[
            ("CAFE_STORE", "memory"),
            ("CAFE_API_KEY", ""),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("CAFE_API_KEY")));
    }

    #[test]
    fn postgres_needs_database_url() {
        let err = Config::from_lookup(lookup_from(&[("CAFE_API_KEY", "k")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn memory_store_and_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("CAFE_API_KEY", "k"),
            ("CAFE_STORE", "memory"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.max_connections, 1);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup_from(&[
            ("CAFE_API_KEY", "k"),
            ("CAFE_STORE", "sqlite"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("CAFE_STORE"));

        let err = Config::from_lookup(lookup_from(&[
            ("CAFE_API_KEY", "k"),
            ("CAFE_STORE", "memory"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "DB_MAX_CONNECTIONS", .. }));
    }
}
