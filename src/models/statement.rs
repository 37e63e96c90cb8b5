//! Statement-related data models.
//!
//! This module defines the immutable statement tuple handed to the query
//! executor, its bound parameter values, and the normalized row shape
//! returned to callers.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A normalized result row: an ordered mapping from column name to a
/// transport-safe scalar value (`serde_json` is built with `preserve_order`,
/// so insertion order is engine-reported column order).
pub type ResultRow = serde_json::Map<String, JsonValue>;

/// A parameter value for parameterized queries.
///
/// Parameters are always passed to the engine as a bound sequence, never
/// interpolated into the SQL text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum QueryParam {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (stored as i64 for maximum range)
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl QueryParam {
    /// Check if this parameter is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type name of this parameter for debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }
}

/// An immutable statement: raw SQL text, optional ordered parameters, and an
/// optional target database. Never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub sql: String,
    #[serde(default)]
    pub params: Vec<QueryParam>,
    /// Target database context. When set, the executor switches the borrowed
    /// connection to this database before execution.
    #[serde(default)]
    pub database: Option<String>,
}

impl Statement {
    /// Create a new statement without parameters or a target database.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            database: None,
        }
    }

    /// Add a bound parameter to this statement.
    pub fn with_param(mut self, param: QueryParam) -> Self {
        self.params.push(param);
        self
    }

    /// Set the target database context.
    pub fn in_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }
}
