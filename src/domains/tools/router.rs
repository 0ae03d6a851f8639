//! Tool Router - builds the rmcp ToolRouter from the catalog.
//!
//! Every route delegates to the shared [`ToolRegistry`], so STDIO/TCP and
//! HTTP run the exact same dispatch.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};

use super::definitions::RenshuuTool;
use super::registry::ToolRegistry;

/// Build the tool router with all catalog tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    RenshuuTool::ALL
        .into_iter()
        .fold(ToolRouter::new(), |router, tool| {
            router.with_route(create_route(tool, registry.clone()))
        })
}

fn create_route<S>(tool: RenshuuTool, registry: Arc<ToolRegistry>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(tool.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let registry = registry.clone();
        async move {
            let envelope = registry
                .dispatch(tool, serde_json::Value::Object(args))
                .await;
            Ok::<_, McpError>(envelope.into_call_tool_result())
        }
        .boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::renshuu::RenshuuClient;
    use crate::domains::renshuu::testing::MockGateway;

    struct TestServer {}

    fn test_registry() -> Arc<ToolRegistry> {
        Arc::new(ToolRegistry::new(RenshuuClient::new(Arc::new(
            MockGateway::new(),
        ))))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_registry());
        let tools = router.list_all();
        assert_eq!(tools.len(), 29);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"get_profile"));
        assert!(names.contains(&"search_words"));
        assert!(names.contains(&"add_word_by_schedule_name"));
        assert!(names.contains(&"remove_grammar_from_list"));
    }

    #[test]
    fn test_registry_matches_router() {
        let registry = test_registry();
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(registry);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
