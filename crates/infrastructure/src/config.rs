//! Application configuration
//!
//! Loaded from an optional TOML file layered with `LICENSING__`-prefixed
//! environment variables (e.g. `LICENSING__DATABASE__PATH`). Every field
//! has a serde default so an empty configuration is valid.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - human-readable logs
    #[default]
    Development,
    /// Production environment - JSON logs by default
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// SQLite database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of concurrent database connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Whether to run pending migrations on startup (default: true)
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_db_path() -> String {
    "licensing.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_true() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            run_migrations: true,
        }
    }
}

/// Logging/tracing output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Emit JSON-formatted log lines instead of the compact human format
    #[serde(default)]
    pub json: bool,
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `<name>.toml` (if present) and environment
    /// variables prefixed with `LICENSING__`
    pub fn load(file_name: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file_name).required(false))
            .add_source(config::Environment::with_prefix("LICENSING").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database.path, "licensing.db");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.run_migrations);
        assert!(!config.telemetry.json);
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!("dev".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn environment_display() {
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("does-not-exist").unwrap();
        assert_eq!(config.database.path, "licensing.db");
    }

    #[test]
    fn deserializes_from_partial_toml() {
        let config: AppConfig = toml_like(r#"{"database": {"path": ":memory:"}}"#);
        assert_eq!(config.database.path, ":memory:");
        assert_eq!(config.database.max_connections, 5);
    }

    fn toml_like(json: &str) -> AppConfig {
        serde_json::from_str(json).unwrap()
    }
}
