//! Data models for the MariaDB MCP Server.
//!
//! This module re-exports all model types used throughout the application.

pub mod schema;
pub mod statement;

// Re-export commonly used types
pub use schema::ColumnDescriptor;
pub use statement::{QueryParam, ResultRow, Statement};
