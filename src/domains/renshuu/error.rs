//! Renshuu-specific error types.

use thiserror::Error;

use super::model::ContainerKind;

/// Failures of a single round-trip through the [`Gateway`](super::Gateway).
///
/// A non-2xx status is *not* a gateway error: the call returns normally and
/// the caller decides based on the status code.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Neither a write nor a read key was configured.
    #[error("Renshuu API key not configured (set RENSHUU_WRITE_KEY or RENSHUU_READ_KEY)")]
    MissingCredentials,

    /// The configured key cannot be sent as an HTTP header value.
    #[error("Renshuu API key contains characters not allowed in an HTTP header")]
    InvalidCredentials,

    /// The request exceeded the fixed timeout ceiling.
    #[error("Request to Renshuu API timed out")]
    Timeout,

    /// Network or protocol failure while talking to the remote service.
    #[error("Request to Renshuu API failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl GatewayError {
    /// Classify a reqwest error, separating timeouts from other failures.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }

    /// HTTP status used when this error is reported to a caller.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingCredentials | Self::InvalidCredentials => 401,
            Self::Timeout => 504,
            Self::Request(_) => 502,
            Self::Build(_) => 500,
        }
    }
}

/// Errors produced while resolving names and performing compound operations.
#[derive(Debug, Error)]
pub enum RenshuuError {
    /// No container's display name matched the requested name.
    #[error("Container '{name}' not found")]
    ContainerNotFound {
        kind: ContainerKind,
        name: String,
        /// Every display name seen, in catalog order.
        available: Vec<String>,
    },

    /// The dictionary search returned no results.
    #[error("Term '{query}' not found in dictionary")]
    TermNotFound { query: String },

    /// The remote call itself failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The remote service answered with an error status.
    #[error("Renshuu API returned HTTP {status}")]
    UnexpectedStatus {
        status: u16,
        body: serde_json::Value,
    },

    /// The remote service answered with a body that is not JSON.
    #[error("Renshuu API returned a non-JSON body (HTTP {status})")]
    MalformedBody { status: u16, raw: String },
}

impl RenshuuError {
    /// Create a "container not found" error.
    pub fn container_not_found(
        kind: ContainerKind,
        name: impl Into<String>,
        available: Vec<String>,
    ) -> Self {
        Self::ContainerNotFound {
            kind,
            name: name.into(),
            available,
        }
    }

    /// Create a "term not found" error.
    pub fn term_not_found(query: impl Into<String>) -> Self {
        Self::TermNotFound {
            query: query.into(),
        }
    }
}
