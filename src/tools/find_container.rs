use crate::dom::{BoundingBox, ContainerAnalysis, ContainerFinder, ContainerSearchResult, SelectorType};
use crate::error::Result;
use crate::tools::utils::{box_summary, default_max_depth, default_root_selector, default_true};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where a container search starts and how far it may go
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContainerQuery {
    /// Full CSS path or XPath of the element to start from
    pub start_selector: String,

    /// How `start_selector` is matched: "css" (default) or "xpath"
    #[serde(default)]
    pub selector_type: SelectorType,

    /// Selector whose subtrees are captured (default: "body")
    #[serde(default = "default_root_selector")]
    pub root_selector: String,

    /// Maximum number of elements visited (default: 50)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl ContainerQuery {
    /// Run the search against the context's snapshot.
    ///
    /// Returns the search result and the direct children of the container
    /// (empty when no container was found).
    pub fn run(&self, context: &mut ToolContext) -> Result<(ContainerSearchResult, Vec<BoundingBox>)> {
        let finder = ContainerFinder::new(self.max_depth);
        let snapshot = context.get_snapshot(&self.root_selector)?;
        let result = snapshot.find_container(&finder, &self.start_selector, self.selector_type);

        let children = result
            .container
            .as_ref()
            .map(|container| snapshot.direct_children(container).into_iter().cloned().collect())
            .unwrap_or_default();

        log::info!("{} (start: '{}')", result.message, self.start_selector);
        Ok((result, children))
    }
}

/// Parameters for the find_container tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindContainerParams {
    #[serde(flatten)]
    pub query: ContainerQuery,

    /// Include the container's direct children in the output (default: true)
    #[serde(default = "default_true")]
    pub include_children: bool,
}

/// Tool locating the first branching ancestor-chain element below a start selector
#[derive(Default)]
pub struct FindContainerTool;

impl Tool for FindContainerTool {
    type Params = FindContainerParams;

    fn name(&self) -> &str {
        "find_container"
    }

    fn execute_typed(&self, params: FindContainerParams, context: &mut ToolContext) -> Result<ToolResult> {
        let (result, children) = params.query.run(context)?;
        let analysis = ContainerAnalysis::from(&result);

        let mut data = serde_json::to_value(&analysis)?;
        if params.include_children {
            data["children"] = children.iter().map(box_summary).collect();
        }

        if analysis.success {
            Ok(ToolResult::success_with(data))
        } else {
            Ok(ToolResult::failure_with(analysis.message, data))
        }
    }
}
