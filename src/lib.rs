//! MariaDB MCP Server Library
//!
//! This library provides MCP (Model Context Protocol) tools for AI assistants
//! to interact with a MariaDB/MySQL server through structured operations
//! instead of a raw SQL socket.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use db::ServerContext;
pub use error::GatewayError;
pub use mcp::MariaDbService;
