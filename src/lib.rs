//! Renshuu MCP Server Library
//!
//! An MCP server and authenticated REST proxy for the Renshuu
//! vocabulary-learning API, including add-by-name operations that resolve a
//! schedule or list and a dictionary word before attaching one to the other.
//!
//! # Architecture
//!
//! - **core**: Configuration, the MCP server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **renshuu**: API gateway, typed client, name resolution and result envelope
//!   - **tools**: The MCP tool catalog and its dispatch
//!   - **proxy**: REST façade served by the HTTP transport
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use renshuu_mcp_server::{
//!     core::{Config, McpServer},
//!     domains::renshuu::{HttpGateway, RenshuuClient},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let gateway = HttpGateway::new(&config.renshuu.base_url, config.credentials.api_key())?;
//!     let server = McpServer::new(config, RenshuuClient::new(Arc::new(gateway)));
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, McpServer};
