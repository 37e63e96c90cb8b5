//! Stdio transport for the MCP server.
//!
//! This transport uses standard input/output for communication, which is the
//! standard mode for CLI-based MCP integrations. Logs go to stderr so they
//! never interleave with the protocol stream.

use crate::db::ServerContext;
use crate::error::{GatewayError, GatewayResult};
use crate::mcp::MariaDbService;
use crate::transport::Transport;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tokio::signal;
use tracing::info;

/// Stdio transport implementation.
///
/// Reads JSON-RPC messages from stdin and writes responses to stdout,
/// following the MCP protocol specification.
pub struct StdioTransport {
    context: Arc<ServerContext>,
}

impl StdioTransport {
    /// Create a new stdio transport over the shared server context.
    pub fn new(context: Arc<ServerContext>) -> Self {
        Self { context }
    }
}

impl Transport for StdioTransport {
    async fn run(&self) -> GatewayResult<()> {
        info!("Starting MCP server with stdio transport");

        let service = MariaDbService::new(self.context.clone());

        let transport = stdio();
        let running_service = service.serve(transport).await.map_err(|e| {
            GatewayError::unavailable(format!("Failed to start stdio transport: {}", e))
        })?;

        let shutdown_requested = tokio::select! {
            result = running_service.waiting() => {
                match result {
                    Ok(_quit_reason) => {
                        info!("Stdio transport completed normally");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Stdio transport error");
                        return Err(GatewayError::unavailable(format!(
                            "Stdio transport error: {}",
                            e
                        )));
                    }
                }
                false
            }
            _ = wait_for_signal() => {
                info!("Shutdown signal received (send again to force exit)");
                true
            }
        };

        if shutdown_requested {
            // Spawn a task to listen for a second signal and force exit
            tokio::spawn(async {
                wait_for_signal().await;
                tracing::warn!("Received second signal, forcing immediate exit");
                std::process::exit(1);
            });
        }

        // Tear down the pool exactly once, on the transport's way out
        self.context.shutdown().await;

        if shutdown_requested {
            // Force exit since stdio may still be blocking on stdin;
            // tokio::select! cannot interrupt blocking stdin reads
            info!("Exiting process");
            std::process::exit(0);
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "stdio"
    }
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_stdio_transport_creation() {
        let config = Config {
            db_user: Some("app".to_string()),
            db_password: Some("secret".to_string()),
            db_name: Some("test".to_string()),
            ..Config::default()
        };
        let context = Arc::new(ServerContext::connect_lazy(&config).unwrap());
        let transport = StdioTransport::new(context);
        assert_eq!(transport.name(), "stdio");
    }
}
