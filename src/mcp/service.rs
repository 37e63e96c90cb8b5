//! MCP service implementation using rmcp.
//!
//! This module defines the MariaDbService struct with all database tools
//! exposed via the MCP protocol using the rmcp framework's macros. Domain
//! errors are translated to typed MCP errors, preserving the failure kind.

use crate::db::ServerContext;
use crate::error::GatewayError;
use crate::tools::admin::{AdminToolHandler, CreateDatabaseInput, CreateDatabaseOutput};
use crate::tools::query::{ExecuteSqlInput, ExecuteSqlOutput, QueryToolHandler};
use crate::tools::schema::{
    GetTableSchemaInput, GetTableSchemaOutput, ListDatabasesOutput, ListTablesInput,
    ListTablesOutput, SchemaToolHandler,
};
use rmcp::Json;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct MariaDbService {
    /// Shared server context (pool, executor, inspector)
    context: Arc<ServerContext>,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl MariaDbService {
    /// Create a new MariaDbService instance over the shared server context.
    pub fn new(context: Arc<ServerContext>) -> Self {
        Self {
            context,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl MariaDbService {
    #[tool(
        description = "List all databases visible to the connected credential.\nReturns an empty list, not an error, when none are visible."
    )]
    async fn list_databases(&self) -> Result<Json<ListDatabasesOutput>, McpError> {
        let handler = SchemaToolHandler::new(self.context.inspector());
        handler
            .list_databases()
            .await
            .map(Json)
            .map_err(|e: GatewayError| e.into())
    }

    #[tool(
        description = "List all tables in the specified database, in engine-reported order.\nFails if database_name is empty."
    )]
    async fn list_tables(
        &self,
        Parameters(input): Parameters<ListTablesInput>,
    ) -> Result<Json<ListTablesOutput>, McpError> {
        let handler = SchemaToolHandler::new(self.context.inspector());
        handler
            .list_tables(input)
            .await
            .map(Json)
            .map_err(|e: GatewayError| e.into())
    }

    #[tool(
        description = "Get the schema of a table: column types, nullability, key roles, defaults, and extra attributes.\nFails with a not-found error if the table does not exist."
    )]
    async fn get_table_schema(
        &self,
        Parameters(input): Parameters<GetTableSchemaInput>,
    ) -> Result<Json<GetTableSchemaOutput>, McpError> {
        let handler = SchemaToolHandler::new(self.context.inspector());
        handler
            .get_table_schema(input)
            .await
            .map(Json)
            .map_err(|e: GatewayError| e.into())
    }

    #[tool(
        description = "Execute an SQL statement against a database.\nSupports positional ? parameters bound separately from the SQL text.\ndatabase_name defaults to the server's configured default database.\nIn read-only mode only statements starting with SELECT, SHOW, DESC, DESCRIBE, USE, CREATE, or EXPLAIN are accepted."
    )]
    async fn execute_sql(
        &self,
        Parameters(input): Parameters<ExecuteSqlInput>,
    ) -> Result<Json<ExecuteSqlOutput>, McpError> {
        let handler = QueryToolHandler::new(self.context.executor());
        handler
            .execute_sql(input)
            .await
            .map(Json)
            .map_err(|e: GatewayError| e.into())
    }

    #[tool(
        description = "Create a database if it does not exist.\nIdempotent: returns status \"exists\" without error when the database is already present."
    )]
    async fn create_database(
        &self,
        Parameters(input): Parameters<CreateDatabaseInput>,
    ) -> Result<Json<CreateDatabaseOutput>, McpError> {
        let handler = AdminToolHandler::new(self.context.executor(), self.context.inspector());
        handler
            .create_database(input)
            .await
            .map(Json)
            .map_err(|e: GatewayError| e.into())
    }
}

#[tool_handler]
impl ServerHandler for MariaDbService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mariadb-mcp-server".to_owned(),
                title: Some("MariaDB MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tools for querying a MariaDB/MySQL server.\n\
                \n\
                ## Workflow\n\
                1. Call `list_databases` to see what is visible to the credential\n\
                2. Call `list_tables` and `get_table_schema` to explore structure\n\
                3. Call `execute_sql` with your statement; pass `database_name` to\n\
                   target a database other than the server default, and bind values\n\
                   with `parameters` + ? placeholders instead of string interpolation\n\
                \n\
                ## Read-only mode\n\
                When the server runs read-only, only statements starting with\n\
                SELECT, SHOW, DESC, DESCRIBE, USE, CREATE, or EXPLAIN are executed;\n\
                everything else fails with a permission error.\n\
                \n\
                ## create_database\n\
                Safe to call repeatedly: an existing database returns status\n\
                \"exists\" instead of an error."
                    .to_string(),
            ),
        }
    }
}
