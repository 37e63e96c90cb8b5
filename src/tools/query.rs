//! SQL execution tool.
//!
//! This module implements the `execute_sql` MCP tool: an arbitrary statement
//! with optional bound parameters against an optional target database,
//! subject to the server's read-only policy.

use crate::db::QueryExecutor;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{QueryParam, ResultRow, Statement};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Input for the execute_sql tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteSqlInput {
    /// SQL statement to execute. In read-only mode only statements starting
    /// with SELECT, SHOW, DESC, DESCRIBE, USE, CREATE, or EXPLAIN are
    /// accepted.
    pub sql_query: String,
    /// Target database. Defaults to the server's configured default database
    /// when empty.
    #[serde(default)]
    pub database_name: String,
    /// Positional parameters bound to ? placeholders; never interpolated
    /// into the SQL text.
    #[serde(default)]
    pub parameters: Vec<QueryParam>,
}

/// Output from the execute_sql tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ExecuteSqlOutput {
    /// Result rows as ordered column-to-value maps
    pub rows: Vec<ResultRow>,
    /// Number of rows returned
    pub row_count: usize,
}

/// Handler for SQL execution.
pub struct QueryToolHandler {
    executor: Arc<QueryExecutor>,
}

impl QueryToolHandler {
    /// Create a new query tool handler.
    pub fn new(executor: Arc<QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Handle the execute_sql tool call.
    pub async fn execute_sql(&self, input: ExecuteSqlInput) -> GatewayResult<ExecuteSqlOutput> {
        if input.sql_query.trim().is_empty() {
            return Err(GatewayError::invalid_argument("sql_query cannot be empty"));
        }

        let database = if input.database_name.trim().is_empty() {
            self.executor.default_database().to_string()
        } else {
            input.database_name
        };

        info!(database = %database, params = input.parameters.len(), "execute_sql");

        let mut statement = Statement::new(input.sql_query).in_database(database);
        statement.params = input.parameters;

        let rows = self.executor.execute(&statement).await?;
        let row_count = rows.len();
        Ok(ExecuteSqlOutput { rows, row_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_defaults() {
        let input: ExecuteSqlInput =
            serde_json::from_str(r#"{"sql_query": "SELECT 1"}"#).unwrap();
        assert_eq!(input.sql_query, "SELECT 1");
        assert!(input.database_name.is_empty());
        assert!(input.parameters.is_empty());
    }

    #[test]
    fn test_input_with_parameters() {
        let input: ExecuteSqlInput = serde_json::from_str(
            r#"{"sql_query": "SELECT * FROM t WHERE id = ?", "database_name": "test", "parameters": [7]}"#,
        )
        .unwrap();
        assert_eq!(input.database_name, "test");
        assert_eq!(input.parameters, vec![QueryParam::Int(7)]);
    }
}
