use crate::browser::ScrollDirection;
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the scroll tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScrollParams {
    /// "down" scrolls to the bottom of the document, "up" back to the top
    pub direction: ScrollDirection,
}

/// Tool scrolling the page to one end, e.g. to trigger lazy loading
#[derive(Default)]
pub struct ScrollTool;

impl Tool for ScrollTool {
    type Params = ScrollParams;

    fn name(&self) -> &str {
        "scroll"
    }

    fn execute_typed(&self, params: ScrollParams, context: &mut ToolContext) -> Result<ToolResult> {
        context.session.scroll_page(params.direction)?;
        // Lazy-loaded content may have changed the layout
        context.invalidate_snapshot();

        Ok(ToolResult::success_with(serde_json::json!({
            "direction": params.direction
        })))
    }
}
