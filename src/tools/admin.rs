//! Database administration tool.
//!
//! This module implements the `create_database` MCP tool. Creation is
//! idempotent: an existing database reports `exists` without error.

use crate::db::{QueryExecutor, SchemaInspector, quote_ident};
use crate::error::GatewayResult;
use crate::models::Statement;
use crate::tools::schema::require_name;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Input for the create_database tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateDatabaseInput {
    /// Name of the database to create
    pub database_name: String,
}

/// Outcome of a create_database call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CreateDatabaseStatus {
    /// The database was created
    Success,
    /// The database already existed; nothing was done
    Exists,
}

/// Output for the create_database tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CreateDatabaseOutput {
    pub status: CreateDatabaseStatus,
    pub message: String,
    pub database_name: String,
}

/// Handler for database administration.
pub struct AdminToolHandler {
    executor: Arc<QueryExecutor>,
    inspector: Arc<SchemaInspector>,
}

impl AdminToolHandler {
    /// Create a new admin tool handler.
    pub fn new(executor: Arc<QueryExecutor>, inspector: Arc<SchemaInspector>) -> Self {
        Self {
            executor,
            inspector,
        }
    }

    /// Handle the create_database tool call.
    pub async fn create_database(
        &self,
        input: CreateDatabaseInput,
    ) -> GatewayResult<CreateDatabaseOutput> {
        let database = require_name(&input.database_name, "database_name")?;

        if self.inspector.database_exists(&database).await {
            let message = format!("Database '{}' already exists.", database);
            info!(database = %database, "create_database: already exists");
            return Ok(CreateDatabaseOutput {
                status: CreateDatabaseStatus::Exists,
                message,
                database_name: database,
            });
        }

        // IF NOT EXISTS keeps a concurrent create from failing the request
        let sql = format!("CREATE DATABASE IF NOT EXISTS {}", quote_ident(&database));
        self.executor.execute(&Statement::new(sql)).await?;

        let message = format!("Database '{}' created successfully.", database);
        info!(database = %database, "create_database: created");
        Ok(CreateDatabaseOutput {
            status: CreateDatabaseStatus::Success,
            message,
            database_name: database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(CreateDatabaseStatus::Exists).unwrap(),
            serde_json::json!("exists")
        );
        assert_eq!(
            serde_json::to_value(CreateDatabaseStatus::Success).unwrap(),
            serde_json::json!("success")
        );
    }

    #[test]
    fn test_output_shape() {
        let output = CreateDatabaseOutput {
            status: CreateDatabaseStatus::Success,
            message: "Database 'x' created successfully.".to_string(),
            database_name: "x".to_string(),
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["database_name"], "x");
    }
}
