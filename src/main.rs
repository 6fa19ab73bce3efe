//! Autotask MCP server binary.
//!
//! Runs as an MCP server over stdio so an assistant host can work with
//! Autotask PSA through natural language.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `AUTOTASK_USERNAME`, `AUTOTASK_SECRET`, `AUTOTASK_INTEGRATION_CODE`
//! - `AUTOTASK_API_URL`: REST base URL of your Autotask zone

use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use autotask_mcp::{autotask_client::AutotaskClient, config::Credentials, server::AutotaskServer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Initialize logging to stderr (critical for stdio transport!)
    // stdout is reserved for MCP JSON-RPC messages
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("autotask_mcp=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Autotask MCP server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from environment
    let credentials = Credentials::from_env().context("Failed to load configuration")?;

    tracing::debug!(base_url = %credentials.base_url(), "Configuration loaded");

    // Create the Autotask client
    let client = AutotaskClient::new(&credentials).context("Failed to create Autotask client")?;

    // Test connection to Autotask before starting
    tracing::info!("Testing connection to Autotask...");
    if let Err(e) = client.test_connection().await {
        tracing::error!(error = %e, "Connection test failed");
        // Continue anyway - the server might become available later
        tracing::warn!(
            "Server will start but may not be able to reach Autotask. \
             Check configuration and network connectivity."
        );
    }

    // Create the MCP server
    let server = AutotaskServer::new(Arc::new(client));

    tracing::info!("Server initialized, starting stdio transport");

    // Serve on stdio transport
    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })
        .context("Failed to start server")?;

    tracing::info!("Server running, waiting for requests");

    // Wait for the service to complete (shutdown signal)
    service
        .waiting()
        .await
        .context("Server error during operation")?;

    tracing::info!("Server shutting down");

    Ok(())
}
