// ⚙️ Configuration - TOML file with defaults for every section

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Environment variable that overrides `database.path`
pub const DATABASE_ENV: &str = "ESTATE_DB";

const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file, or ":memory:"
    #[serde(default = "default_database_path")]
    pub path: PathBuf,

    #[serde(default = "default_true")]
    pub wal: bool,

    #[serde(default = "default_true")]
    pub foreign_keys: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter directive; RUST_LOG takes precedence when set
    #[serde(default = "default_log_filter")]
    pub filter: String,

    #[serde(default)]
    pub json: bool,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("estates.db")
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    "estate_service=info".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: default_database_path(),
            wal: true,
            foreign_keys: true,
        }
    }
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        DatabaseConfig {
            path: PathBuf::from(IN_MEMORY),
            wal: false,
            foreign_keys: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl ServiceConfig {
    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: ServiceConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply ESTATE_DB on top of the file values
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var(DATABASE_ENV) {
            if !path.is_empty() {
                self.database.path = PathBuf::from(path);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ServiceConfig::parse("").unwrap();

        assert_eq!(config.database.path, PathBuf::from("estates.db"));
        assert!(config.database.wal);
        assert!(config.database.foreign_keys);
        assert_eq!(config.logging.filter, "estate_service=info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_partial_sections() {
        let config = ServiceConfig::parse(
            r#"
            [database]
            path = "/tmp/brokerage.db"
            wal = false

            [logging]
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/tmp/brokerage.db"));
        assert!(!config.database.wal);
        assert!(config.database.foreign_keys);
        assert!(config.logging.json);
        assert_eq!(config.logging.filter, "estate_service=info");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ServiceConfig::parse("[database\npath = 1").unwrap_err();
        assert!(matches!(err, crate::error::ServiceError::Config(_)));
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(DatabaseConfig::in_memory().is_in_memory());
        assert!(!DatabaseConfig::default().is_in_memory());
    }
}
