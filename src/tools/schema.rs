//! Schema introspection tools.
//!
//! This module implements the `list_databases`, `list_tables`, and
//! `get_table_schema` MCP tools.

use crate::db::SchemaInspector;
use crate::error::{GatewayError, GatewayResult};
use crate::models::ColumnDescriptor;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::info;

/// Output for the list_databases tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ListDatabasesOutput {
    /// Database names visible to the connected credential, in engine order
    pub databases: Vec<String>,
    /// Number of databases
    pub count: usize,
}

/// Input for the list_tables tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListTablesInput {
    /// Database to list tables from
    pub database_name: String,
}

/// Output for the list_tables tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ListTablesOutput {
    /// Table names in engine-reported order
    pub tables: Vec<String>,
    /// Number of tables
    pub count: usize,
}

/// Input for the get_table_schema tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTableSchemaInput {
    /// Database containing the table
    pub database_name: String,
    /// Table to describe
    pub table_name: String,
}

/// Output for the get_table_schema tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct GetTableSchemaOutput {
    /// Database containing the table
    pub database_name: String,
    /// Described table
    pub table_name: String,
    /// Column name to {type, nullable, key, default, extra}, in engine order
    pub columns: serde_json::Map<String, JsonValue>,
    /// Number of columns
    pub column_count: usize,
}

/// Handler for schema introspection.
pub struct SchemaToolHandler {
    inspector: Arc<SchemaInspector>,
}

impl SchemaToolHandler {
    /// Create a new schema tool handler.
    pub fn new(inspector: Arc<SchemaInspector>) -> Self {
        Self { inspector }
    }

    /// Handle the list_databases tool call.
    pub async fn list_databases(&self) -> GatewayResult<ListDatabasesOutput> {
        let databases = self.inspector.list_databases().await?;
        info!(count = databases.len(), "list_databases");
        let count = databases.len();
        Ok(ListDatabasesOutput { databases, count })
    }

    /// Handle the list_tables tool call.
    pub async fn list_tables(&self, input: ListTablesInput) -> GatewayResult<ListTablesOutput> {
        let database = require_name(&input.database_name, "database_name")?;
        let tables = self.inspector.list_tables(&database).await?;
        info!(database = %database, count = tables.len(), "list_tables");
        let count = tables.len();
        Ok(ListTablesOutput { tables, count })
    }

    /// Handle the get_table_schema tool call.
    pub async fn get_table_schema(
        &self,
        input: GetTableSchemaInput,
    ) -> GatewayResult<GetTableSchemaOutput> {
        let database = require_name(&input.database_name, "database_name")?;
        let table = require_name(&input.table_name, "table_name")?;

        let descriptors = self.inspector.describe_table(&database, &table).await?;
        info!(
            database = %database,
            table = %table,
            columns = descriptors.len(),
            "get_table_schema"
        );

        let column_count = descriptors.len();
        Ok(GetTableSchemaOutput {
            database_name: database,
            table_name: table,
            columns: columns_to_map(descriptors),
            column_count,
        })
    }
}

/// Validate a required name argument; empty or whitespace-only is rejected.
pub(crate) fn require_name(value: &str, field: &str) -> GatewayResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(GatewayError::invalid_argument(format!(
            "{} cannot be empty",
            field
        )))
    } else {
        Ok(trimmed.to_string())
    }
}

fn columns_to_map(descriptors: Vec<ColumnDescriptor>) -> serde_json::Map<String, JsonValue> {
    let mut columns = serde_json::Map::new();
    for col in descriptors {
        columns.insert(
            col.name.clone(),
            serde_json::json!({
                "type": col.data_type,
                "nullable": col.nullable,
                "key": col.key,
                "default": col.default,
                "extra": col.extra,
            }),
        );
    }
    columns
}
