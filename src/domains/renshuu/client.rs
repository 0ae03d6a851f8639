//! Typed operations over the Renshuu REST API.
//!
//! Every method maps one-to-one onto a remote endpoint and returns the raw
//! [`GatewayResponse`]; interpretation is left to the caller.

use std::sync::Arc;

use reqwest::Method;

use super::error::GatewayError;
use super::gateway::{Gateway, GatewayRequest, GatewayResponse};

/// Result of a single remote call.
pub type ApiResult = Result<GatewayResponse, GatewayError>;

/// Session handle for the Renshuu API.
///
/// Cheap to clone; all clones share the same gateway.
#[derive(Clone)]
pub struct RenshuuClient {
    gateway: Arc<dyn Gateway>,
}

impl RenshuuClient {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Issue an arbitrary call (used by the REST passthrough).
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        params: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> ApiResult {
        let request = GatewayRequest::new(method, path)
            .params(params)
            .body(body.unwrap_or_default());
        self.gateway.call(request).await
    }

    async fn send(&self, request: GatewayRequest) -> ApiResult {
        self.gateway.call(request).await
    }

    // ====== profile & catalogs ======

    pub async fn get_profile(&self) -> ApiResult {
        self.send(GatewayRequest::get("/profile")).await
    }

    pub async fn get_lists(&self) -> ApiResult {
        self.send(GatewayRequest::get("/lists")).await
    }

    pub async fn get_list(&self, list_id: &str, pg: u32) -> ApiResult {
        self.send(GatewayRequest::get(format!("/list/{list_id}")).param("pg", pg))
            .await
    }

    /// All studied terms of one type (`vocab`, `grammar`, `kanji`, `sent`).
    pub async fn get_all_studied_terms(&self, termtype: &str, pg: u32) -> ApiResult {
        self.send(GatewayRequest::get(format!("/list/all/{termtype}")).param("pg", pg))
            .await
    }

    pub async fn get_schedules(&self) -> ApiResult {
        self.send(GatewayRequest::get("/schedule")).await
    }

    pub async fn get_schedule(&self, schedule_id: &str) -> ApiResult {
        self.send(GatewayRequest::get(format!("/schedule/{schedule_id}")))
            .await
    }

    pub async fn get_schedule_terms(&self, schedule_id: &str, pg: u32, group: &str) -> ApiResult {
        self.send(
            GatewayRequest::get(format!("/schedule/{schedule_id}/list"))
                .param("pg", pg)
                .param("group", group),
        )
        .await
    }

    // ====== word ======

    pub async fn search_words(&self, value: &str, pg: u32) -> ApiResult {
        self.send(
            GatewayRequest::get("/word/search")
                .param("value", value)
                .param("pg", pg),
        )
        .await
    }

    pub async fn get_word(&self, word_id: &str) -> ApiResult {
        self.send(GatewayRequest::get(format!("/word/{word_id}"))).await
    }

    pub async fn add_word_to_list(&self, word_id: &str, list_id: &str) -> ApiResult {
        self.send(GatewayRequest::put(format!("/word/{word_id}")).param("list_id", list_id))
            .await
    }

    pub async fn add_word_to_schedule(&self, word_id: &str, schedule_id: &str) -> ApiResult {
        self.send(
            GatewayRequest::put(format!("/word/{word_id}")).param("schedule_id", schedule_id),
        )
        .await
    }

    pub async fn remove_word_from_list(&self, word_id: &str, list_id: &str) -> ApiResult {
        self.send(GatewayRequest::delete(format!("/word/{word_id}")).param("list_id", list_id))
            .await
    }

    pub async fn remove_word_from_schedule(&self, word_id: &str, schedule_id: &str) -> ApiResult {
        self.send(
            GatewayRequest::delete(format!("/word/{word_id}")).param("sched_id", schedule_id),
        )
        .await
    }

    // ====== kanji ======

    pub async fn search_kanji(&self, value: &str) -> ApiResult {
        self.send(GatewayRequest::get("/kanji/search").param("value", value))
            .await
    }

    pub async fn get_kanji(&self, kanji: &str) -> ApiResult {
        self.send(GatewayRequest::get(format!("/kanji/{kanji}"))).await
    }

    pub async fn add_kanji_to_list(&self, kanji: &str, list_id: &str) -> ApiResult {
        self.send(GatewayRequest::put(format!("/kanji/{kanji}")).param("list_id", list_id))
            .await
    }

    pub async fn add_kanji_to_schedule(&self, kanji: &str, schedule_id: &str) -> ApiResult {
        self.send(GatewayRequest::put(format!("/kanji/{kanji}")).param("sched_id", schedule_id))
            .await
    }

    pub async fn remove_kanji_from_list(&self, kanji: &str, list_id: &str) -> ApiResult {
        self.send(GatewayRequest::delete(format!("/kanji/{kanji}")).param("list_id", list_id))
            .await
    }

    pub async fn remove_kanji_from_schedule(&self, kanji: &str, schedule_id: &str) -> ApiResult {
        self.send(
            GatewayRequest::delete(format!("/kanji/{kanji}")).param("sched_id", schedule_id),
        )
        .await
    }

    // ====== grammar ======

    pub async fn search_grammar(&self, value: &str, pg: u32) -> ApiResult {
        self.send(
            GatewayRequest::get("/grammar/search")
                .param("value", value)
                .param("pg", pg),
        )
        .await
    }

    pub async fn get_grammar(&self, grammar_id: &str) -> ApiResult {
        self.send(GatewayRequest::get(format!("/grammar/{grammar_id}")))
            .await
    }

    pub async fn add_grammar_to_list(&self, grammar_id: &str, list_id: &str) -> ApiResult {
        self.send(
            GatewayRequest::put(format!("/grammar/{grammar_id}")).param("list_id", list_id),
        )
        .await
    }

    pub async fn add_grammar_to_schedule(&self, grammar_id: &str, schedule_id: &str) -> ApiResult {
        self.send(
            GatewayRequest::put(format!("/grammar/{grammar_id}")).param("sched_id", schedule_id),
        )
        .await
    }

    pub async fn remove_grammar_from_list(&self, grammar_id: &str, list_id: &str) -> ApiResult {
        self.send(
            GatewayRequest::delete(format!("/grammar/{grammar_id}")).param("list_id", list_id),
        )
        .await
    }

    pub async fn remove_grammar_from_schedule(
        &self,
        grammar_id: &str,
        schedule_id: &str,
    ) -> ApiResult {
        self.send(
            GatewayRequest::delete(format!("/grammar/{grammar_id}"))
                .param("sched_id", schedule_id),
        )
        .await
    }

    // ====== sentences ======

    pub async fn search_sentences(&self, value: &str) -> ApiResult {
        self.send(GatewayRequest::get("/reibun/search").param("value", value))
            .await
    }

    pub async fn get_sentences_for_word(&self, word_id: &str) -> ApiResult {
        self.send(GatewayRequest::get(format!("/reibun/search/{word_id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::renshuu::testing::MockGateway;
    use serde_json::json;

    #[tokio::test]
    async fn test_schedule_attach_uses_schedule_id() {
        let gateway = Arc::new(MockGateway::new().respond(Method::PUT, "/word/42", json!({})));
        let client = RenshuuClient::new(gateway.clone());

        client.add_word_to_schedule("42", "7").await.unwrap();

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].param_value("schedule_id"), Some("7"));
    }

    #[tokio::test]
    async fn test_removals_use_sched_id() {
        let gateway = Arc::new(MockGateway::new());
        let client = RenshuuClient::new(gateway.clone());

        client.remove_word_from_schedule("42", "7").await.unwrap();
        client.remove_kanji_from_schedule("食", "7").await.unwrap();

        let calls = gateway.calls();
        assert_eq!(calls[0].path, "/word/42");
        assert_eq!(calls[1].path, "/kanji/食");
        assert!(calls.iter().all(|c| c.method == Method::DELETE));
        assert!(calls.iter().all(|c| c.param_value("sched_id") == Some("7")));
    }

    #[tokio::test]
    async fn test_schedule_terms_params() {
        let gateway = Arc::new(MockGateway::new());
        let client = RenshuuClient::new(gateway.clone());

        client.get_schedule_terms("3", 2, "studied").await.unwrap();

        let call = &gateway.calls()[0];
        assert_eq!(call.path, "/schedule/3/list");
        assert_eq!(
            call.params,
            vec![
                ("pg".to_string(), "2".to_string()),
                ("group".to_string(), "studied".to_string())
            ]
        );
    }
}
