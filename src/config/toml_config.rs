use crate::adapters::http::HttpSettings;
use crate::adapters::PoolSettings;
use crate::core::retry::RetryPolicy;
use crate::utils::error::{Result, SchoolError};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const LOG_FORMATS: &[&str] = &["compact", "json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            body_limit_bytes: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://schools.db".to_string(),
            max_connections: 10,
            connect_timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SchoolError::config(format!(
                "Cannot read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| SchoolError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are kept verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| SchoolError::config(format!("Invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            connect_timeout: Duration::from_secs(self.database.connect_timeout_seconds),
        }
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            cors_origins: self.server.cors_origins.clone(),
            body_limit_bytes: self.server.body_limit_bytes,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.base_delay_ms),
        )
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_positive_number(
            "server.body_limit_bytes",
            self.server.body_limit_bytes as u64,
            1,
        )?;
        validate_non_empty_string("database.url", &self.database.url)?;
        validate_positive_number(
            "database.max_connections",
            u64::from(self.database.max_connections),
            1,
        )?;
        validate_range("retry.max_attempts", self.retry.max_attempts, 1, 10)?;
        validate_one_of("logging.format", &self.logging.format, LOG_FORMATS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 8080
cors_origins = ["http://localhost:5173"]

[database]
url = "sqlite::memory:"
max_connections = 4

[retry]
max_attempts = 5
base_delay_ms = 50

[logging]
level = "debug"
format = "json"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.connect_timeout_seconds, 60);
        assert_eq!(config.retry_policy().delay_for(2), Duration::from_millis(100));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.http_settings().cors_origins.len(), 1);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SCHOOL_LOCATOR_TEST_DB_URL", "sqlite://from-env.db");

        let toml_content = r#"
[database]
url = "${SCHOOL_LOCATOR_TEST_DB_URL}"

[server]
host = "${SCHOOL_LOCATOR_TEST_UNSET_HOST}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.database.url, "sqlite://from-env.db");
        assert_eq!(config.server.host, "${SCHOOL_LOCATOR_TEST_UNSET_HOST}");

        std::env::remove_var("SCHOOL_LOCATOR_TEST_DB_URL");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str("[retry]\nmax_attempts = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str("[database]\nmax_connections = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(AppConfig::from_toml_str("[server\nport = 1").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[server]\nport = 4000\n").unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.port, 4000);

        assert!(AppConfig::from_file("/definitely/not/here.toml").is_err());
    }
}
