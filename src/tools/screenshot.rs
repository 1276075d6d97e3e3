use crate::browser::ImageFormat;
use crate::dom::ContainerAnalysis;
use crate::error::Result;
use crate::tools::find_container::ContainerQuery;
use crate::tools::utils::selector_file_stem;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_output_dir() -> String {
    "screenshots".to_string()
}

/// Parameters for the screenshot_element tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScreenshotElementParams {
    /// CSS selector of the element to capture
    pub selector: String,

    /// Output path without extension; the extension follows `format`
    pub path: String,

    /// "png" (default) or "jpeg"
    #[serde(default)]
    pub format: ImageFormat,
}

/// Tool saving a screenshot of one element
#[derive(Default)]
pub struct ScreenshotElementTool;

impl Tool for ScreenshotElementTool {
    type Params = ScreenshotElementParams;

    fn name(&self) -> &str {
        "screenshot_element"
    }

    fn execute_typed(&self, params: ScreenshotElementParams, context: &mut ToolContext) -> Result<ToolResult> {
        let saved = context
            .session
            .screenshot_element(&params.selector, PathBuf::from(&params.path).as_path(), params.format)?;

        // Overlay removal changes the page
        context.invalidate_snapshot();

        Ok(match saved {
            Some(path) => ToolResult::success_with(serde_json::json!({
                "selector": params.selector,
                "image_path": path.display().to_string(),
                "format": params.format
            })),
            None => ToolResult::failure(format!(
                "Element '{}' is missing or not visible, no screenshot taken",
                params.selector
            )),
        })
    }
}

/// Parameters for the screenshot_children tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScreenshotChildrenParams {
    #[serde(flatten)]
    pub query: ContainerQuery,

    /// Directory the screenshots are written to (default: "screenshots")
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// "png" (default) or "jpeg"
    #[serde(default)]
    pub format: ImageFormat,
}

/// Tool finding a container and saving one screenshot per direct child
#[derive(Default)]
pub struct ScreenshotChildrenTool;

impl Tool for ScreenshotChildrenTool {
    type Params = ScreenshotChildrenParams;

    fn name(&self) -> &str {
        "screenshot_children"
    }

    fn execute_typed(&self, params: ScreenshotChildrenParams, context: &mut ToolContext) -> Result<ToolResult> {
        let (result, children) = params.query.run(context)?;
        let analysis = ContainerAnalysis::from(&result);

        if !analysis.success {
            return Ok(ToolResult::failure_with(analysis.message.clone(), serde_json::to_value(&analysis)?));
        }

        let output_dir = PathBuf::from(&params.output_dir);
        let mut shots = Vec::with_capacity(children.len());
        for child in &children {
            let selector = child.css_selector.trim();
            let stem = output_dir.join(selector_file_stem(selector));
            let saved = context.session.screenshot_element(selector, &stem, params.format)?;
            shots.push(serde_json::json!({
                "css_selector": selector,
                "xpath": child.xpath,
                "image_path": saved.map(|p| p.display().to_string())
            }));
        }
        context.invalidate_snapshot();

        let captured = shots.iter().filter(|s| !s["image_path"].is_null()).count();
        log::info!("Captured {}/{} child screenshot(s) into {}", captured, children.len(), output_dir.display());

        Ok(ToolResult::success_with(serde_json::json!({
            "analysis": analysis,
            "captured": captured,
            "screenshots": shots
        })))
    }
}
