use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("STORAGE_MODE must be 'mongo' or 'in_memory', got '{0}'")]
    InvalidStorageMode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Mongo,
    InMemory,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "in_memory" | "memory" => Ok(Self::InMemory),
            other => Err(ConfigError::InvalidStorageMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub connect_timeout: Duration,
}

/// Per-call bounds handed to the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub write: Duration,
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            write: Duration::from_secs(5),
            read: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage_mode: StorageMode,
    pub mongo: MongoConfig,
    pub timeouts: Timeouts,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv().is_ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source, falling back to defaults for unset values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let storage_mode: StorageMode = var("STORAGE_MODE", "mongo").parse()?;
        let port: u16 = parse_number("PORT", &var("PORT", "8080"))?;

        let mongo = MongoConfig {
            uri: var("MONGODB_URI", "mongodb://localhost:27018"),
            database: var("MONGODB_DATABASE", "go-todolist"),
            collection: var("MONGODB_COLLECTION", "tasks"),
            connect_timeout: seconds("MONGODB_CONNECT_TIMEOUT_SECS", &var("MONGODB_CONNECT_TIMEOUT_SECS", "10"))?,
        };

        let timeouts = Timeouts {
            write: seconds("DB_WRITE_TIMEOUT_SECS", &var("DB_WRITE_TIMEOUT_SECS", "5"))?,
            read: seconds("DB_READ_TIMEOUT_SECS", &var("DB_READ_TIMEOUT_SECS", "10"))?,
        };

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            storage_mode,
            mongo,
            timeouts,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

fn seconds(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    parse_number(name, value).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.storage_mode, StorageMode::Mongo);
        assert_eq!(config.mongo.uri, "mongodb://localhost:27018");
        assert_eq!(config.mongo.database, "go-todolist");
        assert_eq!(config.mongo.collection, "tasks");
        assert_eq!(config.mongo.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.timeouts, Timeouts::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("HOST", "127.0.0.1"),
            ("STORAGE_MODE", "in_memory"),
            ("DB_WRITE_TIMEOUT_SECS", "1"),
        ])
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:3000");
        assert_eq!(config.storage_mode, StorageMode::InMemory);
        assert_eq!(config.timeouts.write, Duration::from_secs(1));
        assert_eq!(config.timeouts.read, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_port_out_of_range() {
        assert!(config_from(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn test_invalid_storage_mode() {
        let err = config_from(&[("STORAGE_MODE", "postgres")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidStorageMode("postgres".to_string()));
    }
}
