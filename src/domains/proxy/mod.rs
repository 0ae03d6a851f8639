//! REST façade over the Renshuu client.
//!
//! Routes:
//! - `GET /openapi.json`, `GET /api-docs.json` - the configured OpenAPI document
//! - `POST /api/v1/renshuu/add-word-by-name` - compound add into a schedule
//! - `POST /api/v1/renshuu/add-word-to-list-by-name` - compound add into a list
//! - `/api/v1/{*path}` - passthrough to the remote API

mod handlers;

use std::path::PathBuf;

use axum::{
    Router,
    routing::{any, get, post},
};

use crate::domains::renshuu::RenshuuClient;

pub use handlers::{AddWordToListRequest, AddWordToScheduleRequest};

/// State shared by the proxy handlers.
#[derive(Clone)]
pub struct ProxyState {
    pub client: RenshuuClient,
    pub openapi_path: PathBuf,
}

impl ProxyState {
    pub fn new(client: RenshuuClient, openapi_path: impl Into<PathBuf>) -> Self {
        Self {
            client,
            openapi_path: openapi_path.into(),
        }
    }
}

/// Build the proxy router.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/openapi.json", get(handlers::openapi_document))
        .route("/api-docs.json", get(handlers::openapi_document))
        .route(
            "/api/v1/renshuu/add-word-by-name",
            post(handlers::add_word_by_name),
        )
        .route(
            "/api/v1/renshuu/add-word-to-list-by-name",
            post(handlers::add_word_to_list_by_name),
        )
        .route("/api/v1/{*path}", any(handlers::passthrough))
        .with_state(state)
}
