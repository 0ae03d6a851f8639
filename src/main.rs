//! Renshuu MCP Server Entry Point
//!
//! Loads configuration, initializes logging, opens the Renshuu API session
//! and serves it over the configured transport.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use renshuu_mcp_server::core::config::LoggingConfig;
use renshuu_mcp_server::core::{Config, McpServer, TransportService};
use renshuu_mcp_server::domains::renshuu::{HttpGateway, RenshuuClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);
    config.log_warnings();

    // One session for the whole process
    let gateway = HttpGateway::new(&config.renshuu.base_url, config.credentials.api_key())
        .context("failed to build Renshuu API client")?;
    let client = RenshuuClient::new(Arc::new(gateway));

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config, client);

    info!("Server initialized");

    let result = transport.run(server).await;

    // The transport consumed the server; the session client is dropped here.
    match &result {
        Ok(()) => info!("Server shutting down"),
        Err(e) => error!("Transport failed: {}", e),
    }

    result.map_err(Into::into)
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout belongs to the STDIO transport.
fn init_logging(logging: &LoggingConfig) {
    let level = match logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
