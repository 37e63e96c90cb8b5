//! Schema introspection.
//!
//! Existence checks and structured schema description for databases and
//! tables, built on the query executor. Existence checks are advisory: they
//! answer false on any lookup failure rather than propagating, since they
//! exist to avoid duplicate-create errors and are never security-critical.

use crate::db::executor::{QueryExecutor, quote_ident};
use crate::error::{GatewayError, GatewayResult};
use crate::models::{ColumnDescriptor, QueryParam, ResultRow, Statement};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::warn;

/// Schema inspector for database introspection.
#[derive(Debug)]
pub struct SchemaInspector {
    executor: Arc<QueryExecutor>,
}

impl SchemaInspector {
    /// Create a new inspector over the shared executor.
    pub fn new(executor: Arc<QueryExecutor>) -> Self {
        Self { executor }
    }

    /// List all databases visible to the connected credential, in engine
    /// order. An empty list is a valid answer, not an error.
    pub async fn list_databases(&self) -> GatewayResult<Vec<String>> {
        let rows = self.executor.execute(&Statement::new("SHOW DATABASES")).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get("Database").and_then(JsonValue::as_str))
            .map(String::from)
            .collect())
    }

    /// List all tables in the given database, in engine order.
    pub async fn list_tables(&self, database: &str) -> GatewayResult<Vec<String>> {
        let stmt = Statement::new("SHOW TABLES").in_database(database);
        let rows = self.executor.execute(&stmt).await?;
        // SHOW TABLES yields one column named after the database; take the
        // first value of each row rather than relying on that name
        Ok(rows
            .iter()
            .filter_map(|row| row.values().next().and_then(JsonValue::as_str))
            .map(String::from)
            .collect())
    }

    /// Check whether a database exists. Advisory: false on empty input or
    /// any lookup failure.
    pub async fn database_exists(&self, database: &str) -> bool {
        if database.is_empty() {
            warn!("database_exists called with empty database name");
            return false;
        }

        let stmt = Statement::new(
            "SELECT SCHEMA_NAME FROM information_schema.SCHEMATA WHERE SCHEMA_NAME = ?",
        )
        .with_param(QueryParam::String(database.to_string()))
        .in_database("information_schema");

        match self.executor.execute(&stmt).await {
            Ok(rows) => !rows.is_empty(),
            Err(err) => {
                warn!(database = %database, error = %err, "Database existence check failed");
                false
            }
        }
    }

    /// Check whether a table exists in the given database. Advisory: false
    /// on empty input or any lookup failure.
    pub async fn table_exists(&self, database: &str, table: &str) -> bool {
        if database.is_empty() || table.is_empty() {
            warn!("table_exists called with empty database or table name");
            return false;
        }

        let stmt = Statement::new(
            "SELECT TABLE_NAME FROM information_schema.TABLES \
             WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?",
        )
        .with_param(QueryParam::String(database.to_string()))
        .with_param(QueryParam::String(table.to_string()))
        .in_database("information_schema");

        match self.executor.execute(&stmt).await {
            Ok(rows) => !rows.is_empty(),
            Err(err) => {
                warn!(
                    database = %database,
                    table = %table,
                    error = %err,
                    "Table existence check failed"
                );
                false
            }
        }
    }

    /// Describe a table's columns via `DESCRIBE` on the fully-qualified,
    /// quoted name. An absent table yields `NotFound`: engine failures and
    /// zero-column answers are both re-verified against the catalog to tell
    /// a missing table from a transient failure.
    pub async fn describe_table(
        &self,
        database: &str,
        table: &str,
    ) -> GatewayResult<Vec<ColumnDescriptor>> {
        let sql = format!("DESCRIBE {}.{}", quote_ident(database), quote_ident(table));
        let stmt = Statement::new(sql);

        let rows = match self.executor.execute(&stmt).await {
            Ok(rows) => rows,
            Err(err) => {
                if !self.table_exists(database, table).await {
                    return Err(self.table_not_found(database, table));
                }
                return Err(err);
            }
        };

        if rows.is_empty() && !self.table_exists(database, table).await {
            return Err(self.table_not_found(database, table));
        }

        Ok(rows.iter().filter_map(column_from_row).collect())
    }

    fn table_not_found(&self, database: &str, table: &str) -> GatewayError {
        GatewayError::not_found(
            format!("{}.{}", database, table),
            "table not found or inaccessible",
        )
    }
}

/// Map one `DESCRIBE` row (Field, Type, Null, Key, Default, Extra) to a
/// column descriptor. Rows without a Field value are skipped.
fn column_from_row(row: &ResultRow) -> Option<ColumnDescriptor> {
    let name = row.get("Field")?.as_str()?.to_string();
    Some(ColumnDescriptor {
        name,
        data_type: text_field(row, "Type"),
        // Nullable iff the engine reports "YES", compared case-insensitively
        nullable: row
            .get("Null")
            .and_then(JsonValue::as_str)
            .map(|v| v.eq_ignore_ascii_case("YES"))
            .unwrap_or(false),
        key: text_field(row, "Key"),
        default: row
            .get("Default")
            .and_then(JsonValue::as_str)
            .map(String::from),
        extra: text_field(row, "Extra"),
    })
}

fn text_field(row: &ResultRow, field: &str) -> String {
    row.get(field)
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string()
}
