//! Tool-specific error types.

use thiserror::Error;

use crate::domains::renshuu::Envelope;

/// Errors raised before a tool reaches the Renshuu API.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not in the catalog.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// The arguments did not match the tool's input schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

impl From<ToolError> for Envelope {
    fn from(err: ToolError) -> Self {
        Envelope::validation(err.to_string())
    }
}
