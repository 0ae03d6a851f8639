//! Tools domain module.
//!
//! Tools are the MCP-facing surface of the Renshuu client: one tool per
//! remote operation plus the two add-by-name conveniences.
//!
//! ## Architecture
//!
//! - `definitions/` - The tool catalog and argument structs
//! - `router.rs` - ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Central dispatch shared by every transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a variant to `RenshuuTool` and list it in `RenshuuTool::ALL`
//! 2. Give it a name, description and params struct in `catalog.rs`
//! 3. Handle it in `ToolRegistry::execute` (the match is exhaustive)

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use definitions::RenshuuTool;
pub use error::ToolError;
pub use registry::{ToolRegistry, unknown_tool_result};
pub use router::build_tool_router;
