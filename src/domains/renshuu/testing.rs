//! Scripted in-memory gateway for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use super::error::GatewayError;
use super::gateway::{Gateway, GatewayRequest, GatewayResponse};

enum Scripted {
    Response(GatewayResponse),
    Timeout,
}

/// Answers by method + path and records every request it receives.
///
/// Unscripted calls get `200 {}`.
#[derive(Default)]
pub struct MockGateway {
    routes: Vec<(Method, String, Scripted)>,
    calls: Mutex<Vec<GatewayRequest>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: Method, path: &str, body: Value) -> Self {
        self.respond_with(method, path, GatewayResponse::json(200, body))
    }

    pub fn respond_with(mut self, method: Method, path: &str, response: GatewayResponse) -> Self {
        self.routes
            .push((method, path.to_string(), Scripted::Response(response)));
        self
    }

    pub fn timeout(mut self, method: Method, path: &str) -> Self {
        self.routes.push((method, path.to_string(), Scripted::Timeout));
        self
    }

    pub fn calls(&self) -> Vec<GatewayRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made to `path`, any method.
    pub fn count(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path == path)
            .count()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn call(&self, request: GatewayRequest) -> Result<GatewayResponse, GatewayError> {
        self.calls.lock().unwrap().push(request.clone());

        let scripted = self
            .routes
            .iter()
            .find(|(method, path, _)| *method == request.method && *path == request.path);

        match scripted {
            Some((_, _, Scripted::Response(response))) => Ok(response.clone()),
            Some((_, _, Scripted::Timeout)) => Err(GatewayError::Timeout),
            None => Ok(GatewayResponse::json(200, serde_json::json!({}))),
        }
    }
}
