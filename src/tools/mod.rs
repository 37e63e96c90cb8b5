//! MCP tool implementations.
//!
//! This module contains all tool handlers behind the MCP surface:
//! - `query`: execute an SQL statement (`execute_sql`)
//! - `schema`: list databases/tables and describe table schemas
//! - `admin`: create databases

pub mod admin;
pub mod query;
pub mod schema;

pub use admin::{AdminToolHandler, CreateDatabaseInput, CreateDatabaseOutput};
pub use query::{ExecuteSqlInput, ExecuteSqlOutput, QueryToolHandler};
pub use schema::{
    GetTableSchemaInput, GetTableSchemaOutput, ListDatabasesOutput, ListTablesInput,
    ListTablesOutput, SchemaToolHandler,
};
