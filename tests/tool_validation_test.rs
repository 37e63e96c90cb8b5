//! Integration tests for tool argument validation.
//!
//! These tests use a lazily-connected server context: validation happens
//! before any database round-trip, so invalid inputs must fail with the
//! right error kind without a live server.

use mariadb_mcp_server::config::Config;
use mariadb_mcp_server::db::ServerContext;
use mariadb_mcp_server::error::GatewayError;
use mariadb_mcp_server::models::Statement;
use mariadb_mcp_server::tools::admin::{AdminToolHandler, CreateDatabaseInput};
use mariadb_mcp_server::tools::query::{ExecuteSqlInput, QueryToolHandler};
use mariadb_mcp_server::tools::schema::{
    GetTableSchemaInput, ListTablesInput, SchemaToolHandler,
};

fn test_context() -> ServerContext {
    let config = Config {
        db_user: Some("app".to_string()),
        db_password: Some("secret".to_string()),
        db_name: Some("test".to_string()),
        ..Config::default()
    };
    ServerContext::connect_lazy(&config).expect("lazy context")
}

#[tokio::test]
async fn test_execute_sql_rejects_empty_query() {
    let context = test_context();
    let handler = QueryToolHandler::new(context.executor());

    let result = handler
        .execute_sql(ExecuteSqlInput {
            sql_query: String::new(),
            database_name: "test".to_string(),
            parameters: Vec::new(),
        })
        .await;

    assert!(matches!(
        result.unwrap_err(),
        GatewayError::InvalidArgument { .. }
    ));
}

#[tokio::test]
async fn test_execute_sql_rejects_whitespace_only_query() {
    let context = test_context();
    let handler = QueryToolHandler::new(context.executor());

    let result = handler
        .execute_sql(ExecuteSqlInput {
            sql_query: "   \n\t".to_string(),
            database_name: String::new(),
            parameters: Vec::new(),
        })
        .await;

    assert!(matches!(
        result.unwrap_err(),
        GatewayError::InvalidArgument { .. }
    ));
}

#[tokio::test]
async fn test_list_tables_rejects_empty_database_name() {
    let context = test_context();
    let handler = SchemaToolHandler::new(context.inspector());

    let result = handler
        .list_tables(ListTablesInput {
            database_name: String::new(),
        })
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidArgument { .. }));
    assert!(err.to_string().contains("database_name"));
}

#[tokio::test]
async fn test_get_table_schema_rejects_empty_names() {
    let context = test_context();
    let handler = SchemaToolHandler::new(context.inspector());

    let missing_db = handler
        .get_table_schema(GetTableSchemaInput {
            database_name: String::new(),
            table_name: "users".to_string(),
        })
        .await;
    assert!(matches!(
        missing_db.unwrap_err(),
        GatewayError::InvalidArgument { .. }
    ));

    let missing_table = handler
        .get_table_schema(GetTableSchemaInput {
            database_name: "test".to_string(),
            table_name: "  ".to_string(),
        })
        .await;
    assert!(matches!(
        missing_table.unwrap_err(),
        GatewayError::InvalidArgument { .. }
    ));
}

#[tokio::test]
async fn test_create_database_rejects_empty_name() {
    let context = test_context();
    let handler = AdminToolHandler::new(context.executor(), context.inspector());

    let result = handler
        .create_database(CreateDatabaseInput {
            database_name: String::new(),
        })
        .await;

    assert!(matches!(
        result.unwrap_err(),
        GatewayError::InvalidArgument { .. }
    ));
}

#[tokio::test]
async fn test_executor_rejects_empty_statement() {
    let context = test_context();
    let executor = context.executor();

    let result = executor.execute(&Statement::new("")).await;

    assert!(matches!(
        result.unwrap_err(),
        GatewayError::InvalidArgument { .. }
    ));
}
