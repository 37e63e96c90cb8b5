//! Database gateway layer.
//!
//! This module provides database access functionality:
//! - Server context and connection pool lifecycle
//! - Query execution with database-context switching
//! - Read-only policy enforcement
//! - Result row normalization
//! - Schema introspection

pub mod executor;
pub mod normalize;
pub mod policy;
pub mod pool;
pub mod schema;

pub use executor::{QueryExecutor, quote_ident};
pub use pool::ServerContext;
pub use schema::SchemaInspector;
