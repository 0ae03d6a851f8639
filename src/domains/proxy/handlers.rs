//! Proxy request handlers.

use axum::{
    Json,
    extract::{RawQuery, State},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{Method, StatusCode, Uri, header};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use super::ProxyState;
use crate::domains::renshuu::{Envelope, ResponseBody, orchestrator};

const PASSTHROUGH_PREFIX: &str = "/api/v1";

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_value())).into_response()
    }
}

/// Body of `POST /api/v1/renshuu/add-word-by-name`.
#[derive(Debug, Default, Deserialize)]
pub struct AddWordToScheduleRequest {
    #[serde(default)]
    pub schedule_name: Option<String>,
    #[serde(default)]
    pub word: Option<String>,
}

/// Body of `POST /api/v1/renshuu/add-word-to-list-by-name`.
#[derive(Debug, Default, Deserialize)]
pub struct AddWordToListRequest {
    #[serde(default)]
    pub list_name: Option<String>,
    #[serde(default)]
    pub word: Option<String>,
}

/// Serve the configured OpenAPI document.
pub async fn openapi_document(State(state): State<ProxyState>) -> Response {
    match tokio::fs::read(&state.openapi_path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(e) => {
            warn!(
                "OpenAPI document {} unavailable: {}",
                state.openapi_path.display(),
                e
            );
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "ok": false,
                    "status": 404,
                    "error": {"message": "OpenAPI document not found"}
                })),
            )
                .into_response()
        }
    }
}

#[instrument(skip_all)]
pub async fn add_word_by_name(State(state): State<ProxyState>, body: Bytes) -> Envelope {
    let request: AddWordToScheduleRequest = match parse_body(&body) {
        Ok(request) => request,
        Err(envelope) => return envelope,
    };
    orchestrator::add_word_by_schedule_name(
        &state.client,
        &request.schedule_name.unwrap_or_default(),
        &request.word.unwrap_or_default(),
    )
    .await
}

#[instrument(skip_all)]
pub async fn add_word_to_list_by_name(State(state): State<ProxyState>, body: Bytes) -> Envelope {
    let request: AddWordToListRequest = match parse_body(&body) {
        Ok(request) => request,
        Err(envelope) => return envelope,
    };
    orchestrator::add_word_by_list_name(
        &state.client,
        &request.list_name.unwrap_or_default(),
        &request.word.unwrap_or_default(),
    )
    .await
}

/// Forward `/api/v1/<path>` to the remote API and mirror its status.
///
/// The path is forwarded still percent-encoded.
#[instrument(skip(state, query, body), fields(path = %uri.path()))]
pub async fn passthrough(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    if !matches!(
        method,
        Method::GET | Method::POST | Method::PUT | Method::DELETE
    ) {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(json!({"ok": false, "error": "Method not allowed"})),
        )
            .into_response();
    }

    let params: Vec<(String, String)> = match query.as_deref().map(serde_urlencoded::from_str) {
        None => Vec::new(),
        Some(Ok(params)) => params,
        Some(Err(e)) => {
            return Envelope::validation(format!("Invalid query string: {e}")).into_response();
        }
    };
    let body = (!body.is_empty()).then(|| body.to_vec());
    let path = uri
        .path()
        .strip_prefix(PASSTHROUGH_PREFIX)
        .unwrap_or(uri.path());

    info!("Proxying {} {}", method, path);
    match state.client.call(method, path, params, body).await
    {
        Ok(response) => {
            let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let payload = match response.body {
                ResponseBody::Json(data) => {
                    json!({"ok": response.status < 400, "status": response.status, "data": data})
                }
                ResponseBody::Raw(raw) => {
                    json!({"ok": response.status < 400, "status": response.status, "raw": raw})
                }
            };
            (status, Json(payload)).into_response()
        }
        Err(err) => Envelope::from(err).into_response(),
    }
}

fn parse_body<T: for<'de> Deserialize<'de> + Default>(body: &[u8]) -> Result<T, Envelope> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| Envelope::validation(format!("Invalid JSON body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::super::{ProxyState, router};
    use crate::domains::renshuu::testing::MockGateway;
    use crate::domains::renshuu::{GatewayResponse, RenshuuClient};
    use axum::body::Body;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use reqwest::Method as ApiMethod;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(gateway: MockGateway) -> (axum::Router, Arc<MockGateway>) {
        app_with_openapi(gateway, "does-not-exist.json")
    }

    fn app_with_openapi(gateway: MockGateway, openapi: &str) -> (axum::Router, Arc<MockGateway>) {
        let gateway = Arc::new(gateway);
        let state = ProxyState::new(RenshuuClient::new(gateway.clone()), openapi);
        (router(state), gateway)
    }

    async fn send(app: axum::Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_add_word_by_name_missing_word() {
        let (app, gateway) = app(MockGateway::new());

        let (status, body) = send(
            app,
            "POST",
            "/api/v1/renshuu/add-word-by-name",
            r#"{"schedule_name": "Daily"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"ok": false, "status": 400, "error": {"message": "Missing schedule_name or word"}})
        );
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_word_by_name_empty_field() {
        let (app, gateway) = app(MockGateway::new());

        let (status, _) = send(
            app,
            "POST",
            "/api/v1/renshuu/add-word-by-name",
            r#"{"schedule_name": "", "word": "eat"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_word_by_name_invalid_json() {
        let (app, _) = app(MockGateway::new());
        let (status, body) = send(app, "POST", "/api/v1/renshuu/add-word-by-name", "{oops").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn test_add_word_by_name_success() {
        let (app, gateway) = app(
            MockGateway::new()
                .respond(
                    ApiMethod::GET,
                    "/schedule",
                    json!({"schedules": [{"id": 1, "name": "Daily"}]}),
                )
                .respond(
                    ApiMethod::GET,
                    "/word/search",
                    json!({"words": [{"id": 42, "kanji_full": "食べる"}]}),
                ),
        );

        let (status, body) = send(
            app,
            "POST",
            "/api/v1/renshuu/add-word-by-name",
            r#"{"schedule_name": "daily", "word": "eat"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["data"]["schedule"]["name"], "Daily");
        assert_eq!(body["data"]["word"]["id"], 42);
        assert_eq!(gateway.count("/word/42"), 1);
    }

    #[tokio::test]
    async fn test_add_word_to_list_unknown_list() {
        let (app, _) = app(MockGateway::new().respond(
            ApiMethod::GET,
            "/lists",
            json!({"termtype_groups": [{"groups": [{"lists": [{"list_id": 3, "title": "Food"}]}]}]}),
        ));

        let (status, body) = send(
            app,
            "POST",
            "/api/v1/renshuu/add-word-to-list-by-name",
            r#"{"list_name": "Travel", "word": "eat"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["context"]["available_names"], json!(["Food"]));
    }

    #[tokio::test]
    async fn test_passthrough_forwards_query() {
        let (app, gateway) = app(MockGateway::new().respond(
            ApiMethod::GET,
            "/word/search",
            json!({"words": []}),
        ));

        let (status, body) = send(app, "GET", "/api/v1/word/search?value=cat&pg=2", "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true, "status": 200, "data": {"words": []}}));

        let call = &gateway.calls()[0];
        assert_eq!(call.path, "/word/search");
        assert_eq!(call.param_value("value"), Some("cat"));
        assert_eq!(call.param_value("pg"), Some("2"));
    }

    #[tokio::test]
    async fn test_passthrough_keeps_path_encoded() {
        let (app, gateway) = app(MockGateway::new());

        let (status, _) = send(app, "GET", "/api/v1/word/search%3Fvalue%3Dx%23frag?pg=1", "").await;

        assert_eq!(status, StatusCode::OK);
        let call = &gateway.calls()[0];
        assert_eq!(call.path, "/word/search%3Fvalue%3Dx%23frag");
        assert_eq!(call.params, vec![("pg".to_string(), "1".to_string())]);
    }

    #[tokio::test]
    async fn test_passthrough_mirrors_error_status_with_raw_body() {
        let (app, _) = app(MockGateway::new().respond_with(
            ApiMethod::DELETE,
            "/word/1",
            GatewayResponse::raw(404, "nope"),
        ));

        let (status, body) = send(app, "DELETE", "/api/v1/word/1", "").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"ok": false, "status": 404, "raw": "nope"}));
    }

    #[tokio::test]
    async fn test_passthrough_forwards_body() {
        let (app, gateway) = app(MockGateway::new());

        let (status, _) = send(app, "PUT", "/api/v1/word/7?list_id=3", r#"{"x": 1}"#).await;

        assert_eq!(status, StatusCode::OK);
        let call = &gateway.calls()[0];
        assert_eq!(call.method, ApiMethod::PUT);
        assert_eq!(call.body.as_deref(), Some(br#"{"x": 1}"#.as_slice()));
    }

    #[tokio::test]
    async fn test_passthrough_rejects_other_methods() {
        let (app, gateway) = app(MockGateway::new());

        let (status, body) = send(app, "PATCH", "/api/v1/word/1", "").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"ok": false, "error": "Method not allowed"}));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_passthrough_timeout_is_504() {
        let (app, _) = app(MockGateway::new().timeout(ApiMethod::GET, "/profile"));

        let (status, body) = send(app, "GET", "/api/v1/profile", "").await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["ok"], false);
        assert_eq!(body["status"], 504);
    }

    #[tokio::test]
    async fn test_openapi_missing_is_404() {
        let (app, _) = app(MockGateway::new());
        let (status, body) = send(app, "GET", "/openapi.json", "").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn test_openapi_served_from_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/api-docs-local.json");
        let (app, _) = app_with_openapi(MockGateway::new(), path);

        let (status, body) = send(app, "GET", "/api-docs.json", "").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["openapi"].is_string());
        assert!(body["paths"]["/api/v1/renshuu/add-word-by-name"].is_object());
    }
}
