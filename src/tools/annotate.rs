use crate::dom::{ContainerAnalysis, annotate::annotate_screenshot};
use crate::error::Result;
use crate::tools::find_container::ContainerQuery;
use crate::tools::{Tool, ToolContext, ToolResult};
use base64::Engine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the annotate_container tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnnotateContainerParams {
    #[serde(flatten)]
    pub query: ContainerQuery,

    /// Write the PNG here; when omitted the image is returned base64-encoded
    #[serde(default)]
    pub output_path: Option<String>,
}

/// Tool drawing the found container and its children onto a full-page screenshot
#[derive(Default)]
pub struct AnnotateContainerTool;

impl Tool for AnnotateContainerTool {
    type Params = AnnotateContainerParams;

    fn name(&self) -> &str {
        "annotate_container"
    }

    fn execute_typed(&self, params: AnnotateContainerParams, context: &mut ToolContext) -> Result<ToolResult> {
        let (result, children) = params.query.run(context)?;
        let analysis = ContainerAnalysis::from(&result);

        let Some(container) = result.container.as_ref() else {
            return Ok(ToolResult::failure_with(analysis.message.clone(), serde_json::to_value(&analysis)?));
        };

        let (screenshot, dimensions) = context.session.capture_full_page()?;
        let child_refs: Vec<_> = children.iter().collect();
        let png = annotate_screenshot(&screenshot, (0, 0), container, &child_refs)?;

        let mut data = serde_json::json!({
            "analysis": analysis,
            "page_width": dimensions.width,
            "page_height": dimensions.height,
            "children_outlined": children.len()
        });

        match params.output_path {
            Some(path) => {
                let path = std::path::PathBuf::from(path);
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, &png)?;
                log::info!("Annotated screenshot saved to {}", path.display());
                data["image_path"] = serde_json::json!(path.display().to_string());
            }
            None => {
                data["image_base64"] = serde_json::json!(base64::engine::general_purpose::STANDARD.encode(&png));
            }
        }

        Ok(ToolResult::success_with(data))
    }
}
