//! Server context and connection pool lifecycle.
//!
//! The server context is constructed once at startup and passed by handle to
//! every component that needs database access; there is no ambient global
//! state. It owns the shared connection pool (through the executor) and the
//! schema inspector built on top of it.

use crate::config::Config;
use crate::db::executor::{QueryExecutor, quote_ident};
use crate::db::schema::SchemaInspector;
use crate::error::{GatewayError, GatewayResult};
use crate::models::Statement;
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared state for one running server: the query executor (owning the pool)
/// and the schema inspector.
#[derive(Debug)]
pub struct ServerContext {
    executor: Arc<QueryExecutor>,
    inspector: Arc<SchemaInspector>,
}

impl ServerContext {
    /// Initialize the context by connecting a pool to the configured server.
    ///
    /// Fails with `Configuration` when credentials or the default database
    /// are missing, and with `Unavailable` when the server cannot be
    /// reached. Both are fatal to startup.
    pub async fn initialize(config: &Config) -> GatewayResult<Self> {
        let (options, default_database) = Self::connect_options(config)?;

        info!(
            host = %config.db_host,
            port = config.db_port,
            database = %default_database,
            max_pool_size = config.max_pool_size,
            "Creating connection pool"
        );

        let pool = Self::pool_options(config)
            .connect_with(options)
            .await
            .map_err(|e| {
                GatewayError::unavailable(format!(
                    "failed to connect to {}:{}: {}",
                    config.db_host, config.db_port, e
                ))
            })?;

        info!("Connection pool initialized");
        Ok(Self::from_pool(pool, default_database, config.read_only))
    }

    /// Build the context without connecting. Connection errors surface on
    /// first use instead of at startup; intended for tests and tooling that
    /// validate inputs before any database round-trip.
    pub fn connect_lazy(config: &Config) -> GatewayResult<Self> {
        let (options, default_database) = Self::connect_options(config)?;
        let pool = Self::pool_options(config).connect_lazy_with(options);
        Ok(Self::from_pool(pool, default_database, config.read_only))
    }

    fn from_pool(pool: MySqlPool, default_database: String, read_only: bool) -> Self {
        let executor = Arc::new(QueryExecutor::new(pool, default_database, read_only));
        let inspector = Arc::new(SchemaInspector::new(executor.clone()));
        if read_only {
            warn!("Server is running in READ-ONLY mode; write statements are disabled");
        }
        Self {
            executor,
            inspector,
        }
    }

    fn connect_options(config: &Config) -> GatewayResult<(MySqlConnectOptions, String)> {
        let user = required(config.db_user.as_deref(), "database user")?;
        let password = required(config.db_password.as_deref(), "database password")?;
        let database = required(config.db_name.as_deref(), "default database name")?;

        config
            .validate_pool()
            .map_err(GatewayError::configuration)?;

        let options = MySqlConnectOptions::new()
            .host(&config.db_host)
            .port(config.db_port)
            .username(user)
            .password(password)
            .database(database)
            .charset("utf8mb4");

        Ok((options, database.to_string()))
    }

    fn pool_options(config: &Config) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .min_connections(config.min_pool_size)
            .max_connections(config.max_pool_size)
            .acquire_timeout(config.acquire_timeout_duration())
    }

    /// The shared query executor.
    pub fn executor(&self) -> Arc<QueryExecutor> {
        self.executor.clone()
    }

    /// The shared schema inspector.
    pub fn inspector(&self) -> Arc<SchemaInspector> {
        self.inspector.clone()
    }

    /// Close the connection pool. Called once when the transport exits.
    pub async fn shutdown(&self) {
        info!("Closing connection pool");
        self.executor.close().await;
        info!("Connection pool closed");
    }

    /// Startup diagnostic: enumerate tables in the default database and,
    /// when the configured sample table is present, log a handful of its
    /// rows. Purely observational; never blocks or fails server startup.
    pub async fn startup_snapshot(&self, sample_table: Option<&str>) {
        let database = self.executor.default_database().to_string();
        let tables = match self.inspector.list_tables(&database).await {
            Ok(tables) => tables,
            Err(err) => {
                warn!(database = %database, error = %err, "Startup table enumeration failed");
                return;
            }
        };

        if tables.is_empty() {
            info!(database = %database, "No tables in default database");
            return;
        }

        info!(database = %database, count = tables.len(), "Tables in default database:");
        for (i, table) in tables.iter().enumerate() {
            info!("  {}. {}", i + 1, table);
        }

        let Some(sample) = sample_table else {
            return;
        };
        if !tables.iter().any(|t| t == sample) {
            return;
        }

        let sql = format!("SELECT * FROM {} LIMIT 3", quote_ident(sample));
        match self
            .executor
            .execute(&Statement::new(sql).in_database(&database))
            .await
        {
            Ok(rows) => {
                info!(table = %sample, rows = rows.len(), "Sample rows:");
                for (i, row) in rows.iter().enumerate() {
                    debug!("  row {}: {}", i + 1, serde_json::Value::Object(row.clone()));
                }
            }
            Err(err) => {
                warn!(table = %sample, error = %err, "Sample row fetch failed");
            }
        }
    }
}

fn required<'a>(value: Option<&'a str>, what: &str) -> GatewayResult<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| GatewayError::configuration(format!("{} is required", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Config {
        Config {
            db_user: Some("app".to_string()),
            db_password: Some("secret".to_string()),
            db_name: Some("test".to_string()),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_connect_lazy_with_credentials() {
        let context = ServerContext::connect_lazy(&configured()).unwrap();
        assert_eq!(context.executor().default_database(), "test");
        assert!(!context.executor().read_only());
    }

    #[test]
    fn test_missing_user_is_configuration_error() {
        let config = Config {
            db_user: None,
            ..configured()
        };
        let err = ServerContext::connect_lazy(&config).unwrap_err();
        assert!(matches!(err, GatewayError::Configuration { .. }));
        assert!(err.to_string().contains("database user"));
    }

    #[test]
    fn test_missing_password_is_configuration_error() {
        let config = Config {
            db_password: Some("   ".to_string()),
            ..configured()
        };
        let err = ServerContext::connect_lazy(&config).unwrap_err();
        assert!(matches!(err, GatewayError::Configuration { .. }));
    }

    #[test]
    fn test_missing_default_database_is_configuration_error() {
        let config = Config {
            db_name: None,
            ..configured()
        };
        let err = ServerContext::connect_lazy(&config).unwrap_err();
        assert!(matches!(err, GatewayError::Configuration { .. }));
    }

    #[test]
    fn test_invalid_pool_sizes_rejected_at_init() {
        let config = Config {
            min_pool_size: 5,
            max_pool_size: 2,
            ..configured()
        };
        let err = ServerContext::connect_lazy(&config).unwrap_err();
        assert!(matches!(err, GatewayError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_read_only_flag_propagates() {
        let config = Config {
            read_only: true,
            ..configured()
        };
        let context = ServerContext::connect_lazy(&config).unwrap();
        assert!(context.executor().read_only());
    }
}
