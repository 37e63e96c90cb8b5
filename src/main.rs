//! MariaDB MCP Server - Main entry point.
//!
//! This server provides MCP (Model Context Protocol) tools for AI assistants
//! to interact with a MariaDB/MySQL server through structured operations.

use clap::Parser;
use mariadb_mcp_server::config::{Config, TransportMode};
use mariadb_mcp_server::db::ServerContext;
use mariadb_mcp_server::transport::{HttpTransport, StdioTransport, Transport};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Logs always go to stderr: in stdio transport mode, stdout carries the
/// MCP protocol stream.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse();

    // Initialize logging
    init_tracing(&config);

    info!(
        transport = %config.transport,
        read_only = config.read_only,
        "Starting MariaDB MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Initialize the server context; failures here (missing credentials,
    // unreachable server) are fatal and exit non-zero
    let context = match ServerContext::initialize(&config).await {
        Ok(context) => Arc::new(context),
        Err(e) => {
            error!(error = %e, "Server startup failed");
            return Err(e.into());
        }
    };

    // Startup diagnostic: log visible tables and optional sample rows.
    // Observational only - a failure here never blocks startup.
    context.startup_snapshot(config.sample_table.as_deref()).await;

    // Run the selected transport
    let result = match config.transport {
        TransportMode::Stdio => {
            info!("Using stdio transport");
            let transport = StdioTransport::new(context);
            transport.run().await
        }
        TransportMode::Http => {
            info!(
                host = %config.http_host,
                port = config.http_port,
                endpoint = %config.mcp_endpoint,
                "Using HTTP transport"
            );
            let transport = HttpTransport::new(
                context,
                &config.http_host,
                config.http_port,
                &config.mcp_endpoint,
            );
            transport.run().await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
