use crate::error::Result;
use crate::tools::utils::{box_summary, default_root_selector};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the get_bounding_boxes tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetBoundingBoxesParams {
    /// Selector whose subtrees are captured (default: "body")
    #[serde(default = "default_root_selector")]
    pub root_selector: String,

    /// Return at most this many boxes, largest first
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Tool listing the visible elements of the page, largest area first
#[derive(Default)]
pub struct GetBoundingBoxesTool;

impl Tool for GetBoundingBoxesTool {
    type Params = GetBoundingBoxesParams;

    fn name(&self) -> &str {
        "get_bounding_boxes"
    }

    fn execute_typed(&self, params: GetBoundingBoxesParams, context: &mut ToolContext) -> Result<ToolResult> {
        let snapshot = context.get_snapshot(&params.root_selector)?;
        let limit = params.limit.unwrap_or(usize::MAX);

        let boxes: Vec<_> = snapshot
            .sorted_by_area()
            .into_iter()
            .take(limit)
            .map(box_summary)
            .collect();

        Ok(ToolResult::success_with(serde_json::json!({
            "root_selector": params.root_selector,
            "count": snapshot.len(),
            "returned": boxes.len(),
            "boxes": boxes
        })))
    }
}
