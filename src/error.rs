//! Error types for the MariaDB MCP Server.
//!
//! This module defines all error types using `thiserror` for ergonomic error
//! handling. Each variant maps to a distinct failure kind so callers can tell
//! a policy rejection from a missing table from an engine failure.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Pool not initialized, exhausted, or otherwise unable to hand out a
    /// connection. Fatal to the request, not to the server.
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },

    #[error("Permission denied: {operation} - {reason}")]
    PermissionDenied { operation: String, reason: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Not found: {object} - {message}")]
    NotFound { object: String, message: String },

    /// The engine rejected or failed the statement (syntax error, missing
    /// object, connectivity loss mid-execution).
    #[error("Query failed: {message}")]
    QueryFailed {
        message: String,
        /// e.g. "42S02" for unknown table
        sql_state: Option<String>,
    },

    /// Missing credentials or invalid settings at pool-initialization time.
    /// Fatal to server startup.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl GatewayError {
    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a permission error.
    pub fn permission_denied(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PermissionDenied {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(object: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            object: object.into(),
            message: message.into(),
        }
    }

    /// Create a query failure with optional SQLSTATE.
    pub fn query_failed(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::QueryFailed {
            message: message.into(),
            sql_state,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Get the SQLSTATE code for engine failures, if available.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            Self::QueryFailed { sql_state, .. } => sql_state.as_deref(),
            _ => None,
        }
    }

    /// Check if this error is retryable by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Convert sqlx errors to GatewayError.
impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => GatewayError::configuration(msg.to_string()),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                GatewayError::query_failed(db_err.message(), code)
            }
            sqlx::Error::PoolTimedOut => {
                GatewayError::unavailable("timed out waiting for a pooled connection")
            }
            sqlx::Error::PoolClosed => GatewayError::unavailable("connection pool is closed"),
            sqlx::Error::WorkerCrashed => GatewayError::unavailable("database worker crashed"),
            sqlx::Error::Io(io_err) => {
                GatewayError::query_failed(format!("I/O error: {}", io_err), None)
            }
            sqlx::Error::Tls(tls_err) => {
                GatewayError::query_failed(format!("TLS error: {}", tls_err), None)
            }
            sqlx::Error::Protocol(msg) => {
                GatewayError::query_failed(format!("protocol error: {}", msg), None)
            }
            sqlx::Error::RowNotFound => GatewayError::query_failed("no rows returned", None),
            sqlx::Error::ColumnNotFound(col) => {
                GatewayError::query_failed(format!("column not found: {}", col), None)
            }
            sqlx::Error::ColumnDecode { index, source } => GatewayError::query_failed(
                format!("failed to decode column {}: {}", index, source),
                None,
            ),
            sqlx::Error::Decode(source) => {
                GatewayError::query_failed(format!("decode error: {}", source), None)
            }
            _ => GatewayError::query_failed(format!("database error: {}", err), None),
        }
    }
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Convert GatewayError to MCP ErrorData for semantic error categorization.
/// The failure kind is preserved in the JSON-RPC error code and message;
/// engine failures carry their SQLSTATE in the `data` object when available.
impl From<GatewayError> for rmcp::ErrorData {
    fn from(err: GatewayError) -> Self {
        match &err {
            GatewayError::InvalidArgument { .. } => {
                rmcp::ErrorData::invalid_params(err.to_string(), None)
            }
            GatewayError::PermissionDenied { .. } => {
                rmcp::ErrorData::invalid_params(err.to_string(), None)
            }
            GatewayError::QueryFailed { message, sql_state } => {
                let msg = match sql_state {
                    Some(code) => format!("Query failed: {} (SQLSTATE: {})", message, code),
                    None => err.to_string(),
                };
                let data = sql_state
                    .as_ref()
                    .map(|code| serde_json::json!({ "sql_state": code }));
                rmcp::ErrorData::invalid_params(msg, data)
            }
            GatewayError::NotFound { .. } => {
                rmcp::ErrorData::resource_not_found(err.to_string(), None)
            }
            GatewayError::Unavailable { .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), None)
            }
            GatewayError::Configuration { .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), None)
            }
        }
    }
}
