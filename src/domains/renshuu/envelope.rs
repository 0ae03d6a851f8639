//! Uniform result envelope returned by both façades.
//!
//! Wire shapes:
//!
//! ```json
//! {"ok": true,  "status": 200, "data": {...}}
//! {"ok": false, "status": 400, "error": {"message": "...", "context": {...}}}
//! {"ok": false, "status": 502, "error": {"message": "...", "response": {...}}}
//! ```

use rmcp::model::{CallToolResult, Content};
use serde::{Serialize, Serializer};
use serde_json::{Value, json};

use super::client::ApiResult;
use super::error::{GatewayError, RenshuuError};

/// Tagged outcome of any operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success {
        data: Value,
    },
    /// A name or term could not be resolved; `context` helps the caller retry.
    DomainError {
        message: String,
        context: Value,
    },
    /// The remote call failed or answered with an error status.
    TransportError {
        message: String,
        status: u16,
        response: Option<Value>,
    },
    /// Required input was missing; no remote call was made.
    ValidationError {
        message: String,
    },
    InternalError {
        message: String,
    },
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self::Success { data }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Wrap the outcome of a plain one-to-one API call.
    pub fn from_api(result: ApiResult) -> Self {
        match result {
            Ok(response) if response.is_success() => Self::success(response.body.into_value()),
            Ok(response) => Self::TransportError {
                message: format!("Renshuu API returned HTTP {}", response.status),
                status: error_status(response.status),
                response: Some(response.body.into_value()),
            },
            Err(err) => err.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// HTTP status code this outcome maps to.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::DomainError { .. } | Self::ValidationError { .. } => 400,
            Self::TransportError { status, .. } => *status,
            Self::InternalError { .. } => 500,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            json!({"ok": false, "status": 500, "error": {"message": e.to_string()}})
        })
    }

    /// Render for the tool-call channel: one pretty-printed JSON text block,
    /// flagged as an error when not ok.
    pub fn into_call_tool_result(self) -> CallToolResult {
        let text = serde_json::to_string_pretty(&self).unwrap_or_else(|e| e.to_string());
        if self.is_ok() {
            CallToolResult::success(vec![Content::text(text)])
        } else {
            CallToolResult::error(vec![Content::text(text)])
        }
    }
}

/// Keep upstream error statuses; anything else becomes 502 Bad Gateway.
fn error_status(status: u16) -> u16 {
    if (400..600).contains(&status) {
        status
    } else {
        502
    }
}

#[derive(Serialize)]
struct WireEnvelope<'a> {
    ok: bool,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<WireError<'a>>,
}

#[derive(Serialize)]
struct WireError<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<&'a Value>,
}

impl<'a> WireError<'a> {
    fn message(message: &'a str) -> Self {
        Self {
            message,
            context: None,
            response: None,
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let error = match self {
            Self::Success { .. } => None,
            Self::DomainError { message, context } => Some(WireError {
                context: Some(context),
                ..WireError::message(message)
            }),
            Self::TransportError {
                message, response, ..
            } => Some(WireError {
                response: response.as_ref(),
                ..WireError::message(message)
            }),
            Self::ValidationError { message } | Self::InternalError { message } => {
                Some(WireError::message(message))
            }
        };
        let data = match self {
            Self::Success { data } => Some(data),
            _ => None,
        };

        WireEnvelope {
            ok: self.is_ok(),
            status: self.status(),
            data,
            error,
        }
        .serialize(serializer)
    }
}

impl From<GatewayError> for Envelope {
    fn from(err: GatewayError) -> Self {
        Self::TransportError {
            message: err.to_string(),
            status: err.status_code(),
            response: None,
        }
    }
}

impl From<RenshuuError> for Envelope {
    fn from(err: RenshuuError) -> Self {
        let message = err.to_string();
        match err {
            RenshuuError::ContainerNotFound {
                kind,
                name,
                available,
            } => Self::DomainError {
                message,
                context: json!({
                    "kind": kind,
                    "name": name,
                    "available_names": available,
                }),
            },
            RenshuuError::TermNotFound { query } => Self::DomainError {
                message,
                context: json!({ "query": query }),
            },
            RenshuuError::Gateway(err) => err.into(),
            RenshuuError::UnexpectedStatus { status, body } => Self::TransportError {
                message,
                status: error_status(status),
                response: Some(body),
            },
            RenshuuError::MalformedBody { raw, .. } => Self::TransportError {
                message,
                status: 502,
                response: Some(json!({ "raw": raw })),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::renshuu::gateway::GatewayResponse;
    use crate::domains::renshuu::model::ContainerKind;
    use rmcp::model::RawContent;

    #[test]
    fn test_success_shape() {
        let value = Envelope::success(json!({"id": 1})).to_value();
        assert_eq!(value, json!({"ok": true, "status": 200, "data": {"id": 1}}));
    }

    #[test]
    fn test_container_not_found_shape() {
        let env: Envelope = RenshuuError::container_not_found(
            ContainerKind::Schedule,
            "Weekly",
            vec!["Daily".to_string()],
        )
        .into();
        assert_eq!(env.status(), 400);
        assert_eq!(
            env.to_value(),
            json!({
                "ok": false,
                "status": 400,
                "error": {
                    "message": "Container 'Weekly' not found",
                    "context": {"kind": "schedule", "name": "Weekly", "available_names": ["Daily"]}
                }
            })
        );
    }

    #[test]
    fn test_term_not_found_context() {
        let env: Envelope = RenshuuError::term_not_found("zzz").into();
        let value = env.to_value();
        assert_eq!(value["error"]["message"], "Term 'zzz' not found in dictionary");
        assert_eq!(value["error"]["context"]["query"], "zzz");
    }

    #[test]
    fn test_transport_status_mapping() {
        let env = Envelope::from_api(Ok(GatewayResponse::json(404, json!({"error": "nope"}))));
        assert_eq!(env.status(), 404);
        assert_eq!(env.to_value()["error"]["response"], json!({"error": "nope"}));

        let timeout: Envelope = GatewayError::Timeout.into();
        assert_eq!(timeout.status(), 504);

        let malformed: Envelope = RenshuuError::MalformedBody {
            status: 200,
            raw: "oops".to_string(),
        }
        .into();
        assert_eq!(malformed.status(), 502);
        assert_eq!(malformed.to_value()["error"]["response"]["raw"], "oops");
    }

    #[test]
    fn test_from_api_raw_success() {
        let env = Envelope::from_api(Ok(GatewayResponse::raw(200, "plain")));
        assert_eq!(env, Envelope::success(json!({"raw": "plain"})));
    }

    #[test]
    fn test_validation_and_internal() {
        assert_eq!(Envelope::validation("Missing word").status(), 400);
        assert_eq!(
            Envelope::internal("boom").to_value(),
            json!({"ok": false, "status": 500, "error": {"message": "boom"}})
        );
    }

    #[test]
    fn test_call_tool_result_embeds_status() {
        let result = Envelope::validation("Missing word").into_call_tool_result();
        assert_eq!(result.is_error, Some(true));
        let text = match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["status"], 400);
        assert_eq!(parsed["ok"], false);

        let ok = Envelope::success(json!({})).into_call_tool_result();
        assert_ne!(ok.is_error, Some(true));
    }
}
