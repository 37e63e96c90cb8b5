//! Query execution engine.
//!
//! The executor owns the shared connection pool and runs every statement
//! through the same path: acquire a connection, resolve and switch the
//! database context, apply the read-only policy, execute with bound
//! parameters, normalize the rows, and return the connection to the pool.
//!
//! Context switches are explicit (`USE`) and re-verified on every call: the
//! pool can hand back a connection that a prior borrower left pointed at a
//! different database, and context mutation on a borrowed connection
//! deliberately persists after release.

use crate::db::normalize::normalize_row;
use crate::db::policy;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{QueryParam, ResultRow, Statement};
use sqlx::Executor;
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlArguments, MySqlRow};
use tracing::{debug, warn};

/// Quote a MySQL identifier with backticks, doubling any embedded backtick
/// so a caller-supplied name cannot escape the quoted region.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// First characters of a statement for log lines, without flooding them.
fn sql_preview(sql: &str) -> String {
    const PREVIEW_CHARS: usize = 100;
    if sql.chars().count() <= PREVIEW_CHARS {
        sql.to_string()
    } else {
        let head: String = sql.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

/// Query executor serving all gateway operations against one shared pool.
#[derive(Debug)]
pub struct QueryExecutor {
    pool: MySqlPool,
    default_database: String,
    read_only: bool,
}

impl QueryExecutor {
    /// Create an executor over an already-built pool.
    pub fn new(pool: MySqlPool, default_database: impl Into<String>, read_only: bool) -> Self {
        Self {
            pool,
            default_database: default_database.into(),
            read_only,
        }
    }

    /// The database used when a statement does not name one.
    pub fn default_database(&self) -> &str {
        &self.default_database
    }

    /// Whether the read-only policy is enforced.
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// Close the underlying pool. Idempotent; called once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Execute a statement and return all result rows, normalized.
    ///
    /// Rows are fetched eagerly; no cursor is exposed to callers. The
    /// borrowed connection returns to the pool on every exit path, including
    /// errors and cancellation, via the pooled connection's drop guard.
    pub async fn execute(&self, statement: &Statement) -> GatewayResult<Vec<ResultRow>> {
        if statement.sql.trim().is_empty() {
            return Err(GatewayError::invalid_argument("SQL statement is empty"));
        }

        debug!(
            sql = %sql_preview(&statement.sql),
            params = statement.params.len(),
            database = ?statement.database,
            "Executing statement"
        );

        // Bounded wait; timeout or closed pool surfaces as Unavailable
        let mut conn = self.pool.acquire().await.map_err(GatewayError::from)?;

        // The pool may hand back a connection left in another context by a
        // prior borrower, so the current database is queried fresh each time.
        let current: Option<String> = sqlx::query_scalar("SELECT DATABASE()")
            .fetch_one(&mut *conn)
            .await
            .map_err(GatewayError::from)?;

        if let Some(target) = statement.database.as_deref() {
            let active = current.as_deref().unwrap_or(&self.default_database);
            if target != active {
                debug!(from = active, to = target, "Switching database context");
                let switch = format!("USE {}", quote_ident(target));
                (&mut *conn)
                    .execute(switch.as_str())
                    .await
                    .map_err(GatewayError::from)?;
            }
        }

        if !policy::is_allowed(&statement.sql, self.read_only) {
            warn!(
                sql = %sql_preview(&statement.sql),
                "Statement blocked in read-only mode"
            );
            return Err(GatewayError::permission_denied(
                "execute",
                "server is in read-only mode",
            ));
        }

        // Statements without parameters run over the text protocol: USE,
        // DESCRIBE, and CREATE DATABASE are not preparable in MySQL.
        let rows: Vec<MySqlRow> = if statement.params.is_empty() {
            (&mut *conn)
                .fetch_all(statement.sql.as_str())
                .await
                .map_err(GatewayError::from)?
        } else {
            let mut query = sqlx::query(&statement.sql);
            for param in &statement.params {
                query = bind_param(query, param);
            }
            query
                .fetch_all(&mut *conn)
                .await
                .map_err(GatewayError::from)?
        };

        debug!(rows = rows.len(), "Statement completed");
        Ok(rows.iter().map(normalize_row).collect())
    }
}

fn bind_param<'q>(
    query: sqlx::query::Query<'q, sqlx::MySql, MySqlArguments>,
    param: &'q QueryParam,
) -> sqlx::query::Query<'q, sqlx::MySql, MySqlArguments> {
    match param {
        QueryParam::Null => query.bind(None::<String>),
        QueryParam::Bool(v) => query.bind(*v),
        QueryParam::Int(v) => query.bind(*v),
        QueryParam::Float(v) => query.bind(*v),
        QueryParam::String(v) => query.bind(v.as_str()),
    }
}
