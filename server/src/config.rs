use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "restaurant.db";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_POOL_SIZE: u32 = 8;
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_SERVICE_NAME: &str = "restaurant-server";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is not a valid socket address: {value}")]
    InvalidAddress { name: &'static str, value: String },

    #[error("{name} must be a positive integer, got {value}")]
    InvalidPoolSize { name: &'static str, value: String },
}

/// Runtime settings, read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub pool_size: u32,
    pub log_filter: String,
    pub otlp_endpoint: Option<String>,
    pub service_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or empty keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_address = get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind_address
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddress {
                name: "BIND_ADDRESS",
                value: bind_address.clone(),
            })?;

        let pool_size = match get("DATABASE_POOL_SIZE") {
            None => DEFAULT_POOL_SIZE,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidPoolSize {
                        name: "DATABASE_POOL_SIZE",
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_address,
            pool_size,
            log_filter: get("LOG_FILTER").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
            service_name: get("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.database_url, "restaurant.db");
        assert_eq!(config.bind_address, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.pool_size, 8);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.otlp_endpoint, None);
        assert_eq!(config.service_name, "restaurant-server");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "/var/lib/restaurant/data.db"),
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("DATABASE_POOL_SIZE", "2"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4317"),
        ])
        .unwrap();

        assert_eq!(config.database_url, "/var/lib/restaurant/data.db");
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.pool_size, 2);
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://collector:4317"));
    }

    #[test]
    fn test_empty_value_uses_default() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();

        assert_eq!(config.database_url, "restaurant.db");
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config_from(&[("BIND_ADDRESS", "localhost")]),
            Err(ConfigError::InvalidAddress {
                name: "BIND_ADDRESS",
                value: "localhost".to_string()
            })
        );
        assert!(matches!(
            config_from(&[("DATABASE_POOL_SIZE", "0")]),
            Err(ConfigError::InvalidPoolSize { .. })
        ));
        assert!(matches!(
            config_from(&[("DATABASE_POOL_SIZE", "many")]),
            Err(ConfigError::InvalidPoolSize { .. })
        ));
    }
}
