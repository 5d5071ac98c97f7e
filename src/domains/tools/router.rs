//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Each `ToolKind` knows how to create its own route, so adding a tool
//! never touches this file.

use rmcp::handler::server::tool::ToolRouter;

use super::registry::ToolKind;
use crate::core::clipboard::SharedClipboard;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(clipboard: SharedClipboard) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolKind::ALL
        .into_iter()
        .fold(ToolRouter::new(), |router, kind| {
            router.with_route(kind.route(clipboard.clone()))
        })
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::core::clipboard::NoClipboard;
    use std::sync::Arc;

    struct TestServer {}

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(Arc::new(NoClipboard));
        let tools = router.list_all();
        assert_eq!(tools.len(), 8);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"json_formatter"));
        assert!(names.contains(&"base64_codec"));
        assert!(names.contains(&"jwt_decoder"));
        assert!(names.contains(&"regex_tester"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let router: ToolRouter<TestServer> = build_tool_router(Arc::new(NoClipboard));
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        let descriptors = ToolRegistry::list_all();
        assert_eq!(descriptors.len(), router_names.len());
        for descriptor in descriptors {
            assert!(router_names.contains(&descriptor.name));
        }
    }
}
