use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the highlight tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HighlightParams {
    /// CSS selector; every match gets an overlay
    pub selector: String,

    /// CSS colour for the overlay, random when omitted
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Default)]
pub struct HighlightTool;

impl Tool for HighlightTool {
    type Params = HighlightParams;

    fn name(&self) -> &str {
        "highlight"
    }

    fn execute_typed(&self, params: HighlightParams, context: &mut ToolContext) -> Result<ToolResult> {
        let color = context.session.highlight(&params.selector, params.color.as_deref())?;

        Ok(ToolResult::success_with(serde_json::json!({
            "selector": params.selector,
            "color": color
        })))
    }
}
