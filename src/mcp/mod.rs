//! MCP (Model Context Protocol) server for container discovery
//!
//! Every MCP tool is a thin wrapper over the matching entry of the tool registry;
//! parameter types are shared with [`crate::tools`].

pub mod handler;
pub use handler::BrowserServer;

use crate::tools::{
    AnnotateContainerParams, FindContainerParams, GetBoundingBoxesParams, GetMarkdownParams, HighlightParams,
    NavigateParams, PageInfoParams, ScreenshotChildrenParams, ScreenshotElementParams, ScrollParams, ToolContext,
    ToolResult as InternalToolResult,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    tool, tool_router,
};
use serde::Serialize;

/// Convert internal ToolResult to MCP CallToolResult
///
/// A failed tool still returns its data (e.g. the search path of an
/// unsuccessful container search) as an error result rather than a protocol error.
fn convert_result(result: InternalToolResult) -> Result<CallToolResult, McpError> {
    let pretty = |data: &serde_json::Value| serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());

    if result.success {
        let text = result.data.as_ref().map(pretty).unwrap_or_else(|| "Success".to_string());
        return Ok(CallToolResult::success(vec![Content::text(text)]));
    }

    let error_msg = result.error.unwrap_or_else(|| "Unknown error".to_string());
    match result.data {
        Some(data) => Ok(CallToolResult::error(vec![Content::text(error_msg), Content::text(pretty(&data))])),
        None => Err(McpError::internal_error(error_msg, None)),
    }
}

#[tool_router]
impl BrowserServer {
    fn run_tool<P: Serialize>(&self, name: &str, params: P) -> Result<CallToolResult, McpError> {
        let tool_params =
            serde_json::to_value(params).map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let session = self.session();
        let mut context = ToolContext::new(&*session);
        let result = session
            .tool_registry()
            .execute(name, tool_params, &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }

    #[tool(description = "Navigate to a specified URL in the browser")]
    fn browser_navigate(&self, params: Parameters<NavigateParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("navigate", params.0)
    }

    #[tool(description = "List the visible elements of the page with their CSS path, XPath, geometry and \
                          direct child count, largest area first")]
    fn browser_get_bounding_boxes(
        &self,
        params: Parameters<GetBoundingBoxesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool("get_bounding_boxes", params.0)
    }

    #[tool(description = "Starting from an element (CSS path or XPath), descend through single-child \
                          wrappers to the first element with several direct children and report it \
                          together with the search path")]
    fn browser_find_container(&self, params: Parameters<FindContainerParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("find_container", params.0)
    }

    #[tool(description = "Save a PNG or JPEG screenshot of the element matching a CSS selector")]
    fn browser_screenshot_element(
        &self,
        params: Parameters<ScreenshotElementParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool("screenshot_element", params.0)
    }

    #[tool(description = "Find the container below an element and save one screenshot per direct child")]
    fn browser_screenshot_children(
        &self,
        params: Parameters<ScreenshotChildrenParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool("screenshot_children", params.0)
    }

    #[tool(description = "Find the container below an element and outline it and its children on a \
                          full-page screenshot")]
    fn browser_annotate_container(
        &self,
        params: Parameters<AnnotateContainerParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool("annotate_container", params.0)
    }

    #[tool(description = "Overlay every element matching a CSS selector with a translucent colour")]
    fn browser_highlight(&self, params: Parameters<HighlightParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("highlight", params.0)
    }

    #[tool(description = "Scroll the page to the top or the bottom")]
    fn browser_scroll(&self, params: Parameters<ScrollParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("scroll", params.0)
    }

    #[tool(description = "Report the current URL and the full document width and height")]
    fn browser_page_info(&self, params: Parameters<PageInfoParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("page_info", params.0)
    }

    #[tool(description = "Get the current page content as markdown")]
    fn browser_get_markdown(&self, params: Parameters<GetMarkdownParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("get_markdown", params.0)
    }
}
