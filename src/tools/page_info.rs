use crate::browser::PageInfo;
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_page_type() -> String {
    "UNKNOWN".to_string()
}

/// Parameters for the page_info tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PageInfoParams {
    /// Category recorded alongside the page, e.g. "LISTING" (default: "UNKNOWN")
    #[serde(default = "default_page_type")]
    pub page_type: String,
}

/// Tool reporting the current URL and full document size
#[derive(Default)]
pub struct PageInfoTool;

impl Tool for PageInfoTool {
    type Params = PageInfoParams;

    fn name(&self) -> &str {
        "page_info"
    }

    fn execute_typed(&self, params: PageInfoParams, context: &mut ToolContext) -> Result<ToolResult> {
        let url = context.session.current_url()?;
        let dimensions = context.session.page_dimensions()?;
        let info = PageInfo::new(params.page_type, url, dimensions);

        let mut data = serde_json::to_value(&info)?;
        data["area"] = serde_json::json!(info.area());
        Ok(ToolResult::success_with(data))
    }
}
