//! Domains module containing business logic organized by bounded contexts.
//!
//! - `renshuu` - API client, name resolution and the result envelope
//! - `tools` - MCP tool catalog and dispatch
//! - `proxy` - REST façade over the same client (HTTP feature only)

#[cfg(feature = "http")]
pub mod proxy;
pub mod renshuu;
pub mod tools;
