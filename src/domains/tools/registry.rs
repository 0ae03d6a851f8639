//! Tool Registry - central dispatch for all tools.
//!
//! This module provides:
//! - Tool metadata for listing
//! - Static dispatch from a [`RenshuuTool`] tag to exactly one client operation
//! - Name-based entry points used by every transport

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use rmcp::model::{CallToolResult, Content, Tool};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::definitions::*;
use super::error::ToolError;
use crate::domains::renshuu::{Envelope, RenshuuClient, orchestrator};

/// Tool registry - owns the injected client and routes tool calls to it.
#[derive(Clone)]
pub struct ToolRegistry {
    client: RenshuuClient,
}

impl ToolRegistry {
    /// Create a new tool registry around the session client.
    pub fn new(client: RenshuuClient) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        RenshuuTool::ALL.iter().map(|tool| tool.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        RenshuuTool::ALL.into_iter().map(RenshuuTool::to_tool).collect()
    }

    /// Resolve a tool name against the catalog.
    pub fn lookup(name: &str) -> Result<RenshuuTool, ToolError> {
        RenshuuTool::from_name(name).ok_or_else(|| ToolError::not_found(name))
    }

    /// Call a tool by name, producing the MCP result.
    ///
    /// Unknown names produce an `{"error": "Unknown tool: <name>"}` payload
    /// instead of a protocol error.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> CallToolResult {
        match Self::lookup(name) {
            Ok(tool) => self.dispatch(tool, arguments).await.into_call_tool_result(),
            Err(err) => unknown_tool_result(err),
        }
    }

    /// Call a tool by name and render the result as JSON (for HTTP transport).
    pub async fn call_tool_json(&self, name: &str, arguments: Value) -> Value {
        let result = self.call_tool(name, arguments).await;
        serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        })
    }

    /// Run one tool. Panics are reported as an internal error envelope.
    #[instrument(skip(self, tool, arguments), fields(tool = %tool))]
    pub async fn dispatch(&self, tool: RenshuuTool, arguments: Value) -> Envelope {
        info!("Calling tool {}", tool);
        match AssertUnwindSafe(self.execute(tool, arguments))
            .catch_unwind()
            .await
        {
            Ok(Ok(envelope)) => envelope,
            Ok(Err(err)) => {
                warn!("Rejected arguments for {}: {}", tool, err);
                err.into()
            }
            Err(_) => {
                error!("Tool {} panicked", tool);
                Envelope::internal(format!("Tool '{tool}' failed unexpectedly"))
            }
        }
    }

    async fn execute(&self, tool: RenshuuTool, arguments: Value) -> Result<Envelope, ToolError> {
        let client = &self.client;

        let envelope = match tool {
            // ===== User & Lists =====
            RenshuuTool::GetProfile => {
                parse::<NoParams>(arguments)?;
                Envelope::from_api(client.get_profile().await)
            }
            RenshuuTool::GetSchedules => {
                parse::<NoParams>(arguments)?;
                Envelope::from_api(client.get_schedules().await)
            }
            RenshuuTool::GetSchedule => {
                let p: ScheduleIdParams = parse(arguments)?;
                Envelope::from_api(client.get_schedule(&p.schedule_id).await)
            }
            RenshuuTool::GetScheduleTerms => {
                let p: ScheduleTermsParams = parse(arguments)?;
                Envelope::from_api(
                    client
                        .get_schedule_terms(&p.schedule_id, p.page, &p.group)
                        .await,
                )
            }
            RenshuuTool::GetLists => {
                parse::<NoParams>(arguments)?;
                Envelope::from_api(client.get_lists().await)
            }
            RenshuuTool::GetList => {
                let p: ListPageParams = parse(arguments)?;
                Envelope::from_api(client.get_list(&p.list_id, p.page).await)
            }
            RenshuuTool::GetAllStudiedTerms => {
                let p: StudiedTermsParams = parse(arguments)?;
                Envelope::from_api(client.get_all_studied_terms(&p.termtype, p.page).await)
            }

            // ===== Vocab =====
            RenshuuTool::SearchWords => {
                let p: PagedSearchParams = parse(arguments)?;
                Envelope::from_api(client.search_words(&p.query, p.page).await)
            }
            RenshuuTool::GetWord => {
                let p: WordIdParams = parse(arguments)?;
                Envelope::from_api(client.get_word(&p.word_id).await)
            }
            RenshuuTool::AddWordToSchedule => {
                let p: WordScheduleParams = parse(arguments)?;
                Envelope::from_api(client.add_word_to_schedule(&p.word_id, &p.schedule_id).await)
            }
            RenshuuTool::AddWordToList => {
                let p: WordListParams = parse(arguments)?;
                Envelope::from_api(client.add_word_to_list(&p.word_id, &p.list_id).await)
            }
            RenshuuTool::RemoveWordFromSchedule => {
                let p: WordScheduleParams = parse(arguments)?;
                Envelope::from_api(
                    client
                        .remove_word_from_schedule(&p.word_id, &p.schedule_id)
                        .await,
                )
            }
            RenshuuTool::RemoveWordFromList => {
                let p: WordListParams = parse(arguments)?;
                Envelope::from_api(client.remove_word_from_list(&p.word_id, &p.list_id).await)
            }
            RenshuuTool::AddWordByScheduleName => {
                let p: WordByScheduleNameParams = parse(arguments)?;
                orchestrator::add_word_by_schedule_name(client, &p.schedule_name, &p.word).await
            }
            RenshuuTool::AddWordByListName => {
                let p: WordByListNameParams = parse(arguments)?;
                orchestrator::add_word_by_list_name(client, &p.list_name, &p.word).await
            }

            // ===== Kanji =====
            RenshuuTool::SearchKanji => {
                let p: SearchParams = parse(arguments)?;
                Envelope::from_api(client.search_kanji(&p.query).await)
            }
            RenshuuTool::GetKanji => {
                let p: KanjiParams = parse(arguments)?;
                Envelope::from_api(client.get_kanji(&p.kanji).await)
            }
            RenshuuTool::AddKanjiToSchedule => {
                let p: KanjiScheduleParams = parse(arguments)?;
                Envelope::from_api(client.add_kanji_to_schedule(&p.kanji, &p.schedule_id).await)
            }
            RenshuuTool::AddKanjiToList => {
                let p: KanjiListParams = parse(arguments)?;
                Envelope::from_api(client.add_kanji_to_list(&p.kanji, &p.list_id).await)
            }
            RenshuuTool::RemoveKanjiFromSchedule => {
                let p: KanjiScheduleParams = parse(arguments)?;
                Envelope::from_api(
                    client
                        .remove_kanji_from_schedule(&p.kanji, &p.schedule_id)
                        .await,
                )
            }
            RenshuuTool::RemoveKanjiFromList => {
                let p: KanjiListParams = parse(arguments)?;
                Envelope::from_api(client.remove_kanji_from_list(&p.kanji, &p.list_id).await)
            }

            // ===== Grammar =====
            RenshuuTool::SearchGrammar => {
                let p: PagedSearchParams = parse(arguments)?;
                Envelope::from_api(client.search_grammar(&p.query, p.page).await)
            }
            RenshuuTool::GetGrammar => {
                let p: GrammarIdParams = parse(arguments)?;
                Envelope::from_api(client.get_grammar(&p.grammar_id).await)
            }
            RenshuuTool::AddGrammarToSchedule => {
                let p: GrammarScheduleParams = parse(arguments)?;
                Envelope::from_api(
                    client
                        .add_grammar_to_schedule(&p.grammar_id, &p.schedule_id)
                        .await,
                )
            }
            RenshuuTool::AddGrammarToList => {
                let p: GrammarListParams = parse(arguments)?;
                Envelope::from_api(client.add_grammar_to_list(&p.grammar_id, &p.list_id).await)
            }
            RenshuuTool::RemoveGrammarFromSchedule => {
                let p: GrammarScheduleParams = parse(arguments)?;
                Envelope::from_api(
                    client
                        .remove_grammar_from_schedule(&p.grammar_id, &p.schedule_id)
                        .await,
                )
            }
            RenshuuTool::RemoveGrammarFromList => {
                let p: GrammarListParams = parse(arguments)?;
                Envelope::from_api(
                    client
                        .remove_grammar_from_list(&p.grammar_id, &p.list_id)
                        .await,
                )
            }

            // ===== Sentences =====
            RenshuuTool::SearchSentences => {
                let p: SearchParams = parse(arguments)?;
                Envelope::from_api(client.search_sentences(&p.query).await)
            }
            RenshuuTool::GetSentencesForWord => {
                let p: WordIdParams = parse(arguments)?;
                Envelope::from_api(client.get_sentences_for_word(&p.word_id).await)
            }
        };

        Ok(envelope)
    }
}

/// Deserialize tool arguments; `null` is treated as an empty object.
fn parse<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Result returned for a tool name outside the catalog.
pub fn unknown_tool_result(err: ToolError) -> CallToolResult {
    warn!("{}", err);
    let payload = serde_json::json!({ "error": err.to_string() });
    CallToolResult::error(vec![Content::text(
        serde_json::to_string_pretty(&payload).unwrap_or_else(|_| err.to_string()),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::renshuu::GatewayResponse;
    use crate::domains::renshuu::testing::MockGateway;
    use reqwest::Method;
    use rmcp::model::RawContent;
    use serde_json::json;
    use std::sync::Arc;

    fn registry_with(gateway: MockGateway) -> (ToolRegistry, Arc<MockGateway>) {
        let gateway = Arc::new(gateway);
        (
            ToolRegistry::new(RenshuuClient::new(gateway.clone())),
            gateway,
        )
    }

    fn text_of(result: &CallToolResult) -> Value {
        match &result.content[0].raw {
            RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_registry_tool_names() {
        let (registry, _) = registry_with(MockGateway::new());
        let names = registry.tool_names();
        assert_eq!(names.len(), 29);
        assert!(names.contains(&"get_profile"));
        assert!(names.contains(&"add_word_by_schedule_name"));
        assert!(names.contains(&"add_word_by_list_name"));
        assert!(names.contains(&"get_sentences_for_word"));
        assert_eq!(ToolRegistry::get_all_tools().len(), names.len());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_payload_not_failure() {
        let (registry, gateway) = registry_with(MockGateway::new());
        let result = registry.call_tool("unknown", json!({})).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), json!({"error": "Unknown tool: unknown"}));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_argument_rejected_before_remote_call() {
        let (registry, gateway) = registry_with(MockGateway::new());
        let env = registry
            .dispatch(RenshuuTool::AddWordByScheduleName, json!({"word": "eat"}))
            .await;

        assert!(matches!(env, Envelope::ValidationError { .. }));
        assert_eq!(env.status(), 400);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_names_rejected_before_remote_call() {
        let (registry, gateway) = registry_with(MockGateway::new().respond(
            Method::GET,
            "/schedule",
            json!({"schedules": [{"id": 1, "name": ""}]}),
        ));

        let env = registry
            .dispatch(
                RenshuuTool::AddWordByScheduleName,
                json!({"schedule_name": "", "word": ""}),
            )
            .await;
        assert_eq!(
            env.to_value(),
            json!({"ok": false, "status": 400, "error": {"message": "Missing schedule_name or word"}})
        );

        let env = registry
            .dispatch(
                RenshuuTool::AddWordByListName,
                json!({"list_name": "Food", "word": ""}),
            )
            .await;
        assert_eq!(env.to_value()["error"]["message"], "Missing list_name or word");

        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_words_defaults_page() {
        let (registry, gateway) = registry_with(MockGateway::new().respond(
            Method::GET,
            "/word/search",
            json!({"words": [{"id": 1}]}),
        ));

        let result = registry
            .call_tool("search_words", json!({"query": "cat"}))
            .await;

        assert_ne!(result.is_error, Some(true));
        let payload = text_of(&result);
        assert_eq!(payload["ok"], true);
        assert_eq!(payload["data"]["words"][0]["id"], 1);
        assert_eq!(gateway.calls()[0].param_value("pg"), Some("1"));
    }

    #[tokio::test]
    async fn test_remote_error_embeds_status() {
        let (registry, _) = registry_with(MockGateway::new().respond_with(
            Method::GET,
            "/schedule/404",
            GatewayResponse::json(404, json!({"error": "no such schedule"})),
        ));

        let result = registry
            .call_tool("get_schedule", json!({"schedule_id": "404"}))
            .await;

        assert_eq!(result.is_error, Some(true));
        let payload = text_of(&result);
        assert_eq!(payload["status"], 404);
        assert_eq!(payload["error"]["response"]["error"], "no such schedule");
    }

    #[tokio::test]
    async fn test_add_word_by_schedule_name_tool() {
        let (registry, gateway) = registry_with(
            MockGateway::new()
                .respond(
                    Method::GET,
                    "/schedule",
                    json!({"schedules": [{"id": 5, "name": "Daily"}]}),
                )
                .respond(
                    Method::GET,
                    "/word/search",
                    json!({"words": [{"id": 42, "kanji_full": "食べる"}]}),
                ),
        );

        let result = registry
            .call_tool(
                "add_word_by_schedule_name",
                json!({"schedule_name": "DAILY", "word": "eat"}),
            )
            .await;

        let payload = text_of(&result);
        assert_eq!(payload["data"]["schedule"]["id"], 5);
        assert_eq!(payload["data"]["word"]["id"], 42);
        assert_eq!(gateway.count("/word/42"), 1);
    }

    #[tokio::test]
    async fn test_null_arguments_for_no_param_tool() {
        let (registry, gateway) = registry_with(MockGateway::new());
        let env = registry.dispatch(RenshuuTool::GetProfile, Value::Null).await;
        assert!(env.is_ok());
        assert_eq!(gateway.count("/profile"), 1);
    }

    #[test]
    fn test_dispatch_outside_async_context() {
        let (registry, gateway) = registry_with(MockGateway::new());
        let env = tokio_test::block_on(
            registry.dispatch(RenshuuTool::GetKanji, json!({"kanji": "食"})),
        );
        assert!(env.is_ok());
        assert_eq!(gateway.count("/kanji/食"), 1);
    }

    #[tokio::test]
    async fn test_call_tool_json_shape() {
        let (registry, _) = registry_with(MockGateway::new());
        let value = registry.call_tool_json("get_lists", json!({})).await;
        assert_eq!(value["isError"], false);
        assert!(value["content"].is_array());
    }
}
