//! Configuration handling for the MariaDB MCP Server.
//!
//! This module provides configuration management via CLI arguments and
//! environment variables.

use clap::{Parser, ValueEnum};
use std::time::Duration;

pub const DEFAULT_DB_HOST: &str = "127.0.0.1";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 9001;
pub const DEFAULT_MCP_ENDPOINT: &str = "/";

// Pool configuration defaults
pub const DEFAULT_MAX_POOL_SIZE: u32 = 10;
pub const DEFAULT_MIN_POOL_SIZE: u32 = 1;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Transport mode for the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TransportMode {
    /// Standard input/output (for CLI integration)
    #[default]
    Stdio,
    /// Streamable HTTP (for web clients)
    Http,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Configuration for the MariaDB MCP Server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mariadb-mcp-server",
    about = "MCP server for MariaDB/MySQL - enables AI assistants to query databases through structured tools",
    version,
    author
)]
pub struct Config {
    /// Database server host
    #[arg(long, default_value = DEFAULT_DB_HOST, env = "DB_HOST")]
    pub db_host: String,

    /// Database server port
    #[arg(long, default_value_t = DEFAULT_DB_PORT, env = "DB_PORT")]
    pub db_port: u16,

    /// Database user (required for startup)
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    /// Database password (required for startup, never logged)
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Default database for queries that do not name one
    #[arg(long, env = "DB_NAME")]
    pub db_name: Option<String>,

    /// Run in read-only mode: only statements starting with an allowed
    /// read prefix (SELECT, SHOW, DESC, DESCRIBE, USE, CREATE, EXPLAIN)
    /// are executed.
    #[arg(long, env = "MCP_READ_ONLY")]
    pub read_only: bool,

    /// Maximum number of pooled connections
    #[arg(long, default_value_t = DEFAULT_MAX_POOL_SIZE, env = "MCP_MAX_POOL_SIZE")]
    pub max_pool_size: u32,

    /// Minimum number of connections kept warm in the pool
    #[arg(long, default_value_t = DEFAULT_MIN_POOL_SIZE, env = "MCP_MIN_POOL_SIZE")]
    pub min_pool_size: u32,

    /// Bounded wait for a pooled connection, in seconds
    #[arg(long, default_value_t = DEFAULT_ACQUIRE_TIMEOUT_SECS, env = "MCP_ACQUIRE_TIMEOUT")]
    pub acquire_timeout: u64,

    /// Transport mode (stdio or http)
    #[arg(short, long, value_enum, default_value = "stdio", env = "MCP_TRANSPORT")]
    pub transport: TransportMode,

    /// HTTP host to bind to (only used with http transport)
    #[arg(long, default_value = DEFAULT_HTTP_HOST, env = "MCP_HTTP_HOST")]
    pub http_host: String,

    /// HTTP port to bind to (only used with http transport)
    #[arg(long, default_value_t = DEFAULT_HTTP_PORT, env = "MCP_HTTP_PORT")]
    pub http_port: u16,

    /// MCP endpoint path (only used with http transport)
    #[arg(long, default_value = DEFAULT_MCP_ENDPOINT, env = "MCP_ENDPOINT")]
    pub mcp_endpoint: String,

    /// Table to sample in the startup diagnostic, if present in the
    /// default database
    #[arg(long, env = "MCP_SAMPLE_TABLE")]
    pub sample_table: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Parse configuration from command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            db_host: DEFAULT_DB_HOST.to_string(),
            db_port: DEFAULT_DB_PORT,
            db_user: None,
            db_password: None,
            db_name: None,
            read_only: false,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            min_pool_size: DEFAULT_MIN_POOL_SIZE,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            transport: TransportMode::Stdio,
            http_host: DEFAULT_HTTP_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            mcp_endpoint: DEFAULT_MCP_ENDPOINT.to_string(),
            sample_table: None,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Validate pool settings and return an error message if invalid.
    pub fn validate_pool(&self) -> Result<(), String> {
        if self.max_pool_size == 0 {
            return Err("max_pool_size must be greater than 0".to_string());
        }
        if self.min_pool_size == 0 {
            return Err("min_pool_size must be greater than 0".to_string());
        }
        if self.min_pool_size > self.max_pool_size {
            return Err(format!(
                "min_pool_size ({}) cannot exceed max_pool_size ({})",
                self.min_pool_size, self.max_pool_size
            ));
        }
        Ok(())
    }

    /// Get the HTTP bind address.
    pub fn http_bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Get the pool acquire timeout as a Duration.
    pub fn acquire_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.transport, TransportMode::Stdio);
        assert_eq!(config.db_host, DEFAULT_DB_HOST);
        assert_eq!(config.db_port, DEFAULT_DB_PORT);
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert!(!config.read_only);
    }

    #[test]
    fn test_http_bind_addr() {
        let config = Config {
            http_host: "0.0.0.0".to_string(),
            http_port: 3000,
            ..Config::default()
        };
        assert_eq!(config.http_bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_acquire_timeout_duration() {
        let config = Config {
            acquire_timeout: 60,
            ..Config::default()
        };
        assert_eq!(config.acquire_timeout_duration(), Duration::from_secs(60));
    }

    #[test]
    fn test_validate_pool_defaults() {
        assert!(Config::default().validate_pool().is_ok());
    }

    #[test]
    fn test_validate_pool_max_zero() {
        let config = Config {
            max_pool_size: 0,
            ..Config::default()
        };
        let err = config.validate_pool().unwrap_err();
        assert!(err.contains("max_pool_size"));
    }

    #[test]
    fn test_validate_pool_min_zero() {
        let config = Config {
            min_pool_size: 0,
            ..Config::default()
        };
        let err = config.validate_pool().unwrap_err();
        assert!(err.contains("min_pool_size"));
    }

    #[test]
    fn test_validate_pool_min_exceeds_max() {
        let config = Config {
            min_pool_size: 20,
            max_pool_size: 5,
            ..Config::default()
        };
        let err = config.validate_pool().unwrap_err();
        assert!(err.contains("cannot exceed"));
    }

    #[test]
    fn test_transport_mode_display() {
        assert_eq!(TransportMode::Stdio.to_string(), "stdio");
        assert_eq!(TransportMode::Http.to_string(), "http");
    }
}
