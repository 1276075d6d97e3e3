//! Browser automation tools
//!
//! Every tool takes typed, JSON-schema described parameters and returns a
//! [`ToolResult`]. Tools are looked up by name through a [`ToolRegistry`], which
//! is what the MCP server and the CLI drive.

pub mod annotate;
pub mod bounding_boxes;
pub mod find_container;
pub mod highlight;
pub mod markdown;
pub mod navigate;
pub mod page_info;
pub mod screenshot;
pub mod scroll;
pub mod utils;

pub use annotate::{AnnotateContainerParams, AnnotateContainerTool};
pub use bounding_boxes::{GetBoundingBoxesParams, GetBoundingBoxesTool};
pub use find_container::{FindContainerParams, FindContainerTool};
pub use highlight::{HighlightParams, HighlightTool};
pub use markdown::{GetMarkdownParams, GetMarkdownTool};
pub use navigate::{NavigateParams, NavigateTool};
pub use page_info::{PageInfoParams, PageInfoTool};
pub use screenshot::{ScreenshotChildrenParams, ScreenshotChildrenTool, ScreenshotElementParams, ScreenshotElementTool};
pub use scroll::{ScrollParams, ScrollTool};

use crate::browser::BrowserSession;
use crate::dom::Snapshot;
use crate::error::{BrowserError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// Successful result without payload
    pub fn success() -> Self {
        Self { success: true, data: None, error: None }
    }

    /// Successful result with payload
    pub fn success_with(data: Value) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    /// Failed result with an explanation
    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }

    /// Failed result that still carries diagnostic payload
    pub fn failure_with(error: impl Into<String>, data: Value) -> Self {
        Self { success: false, data: Some(data), error: Some(error.into()) }
    }
}

/// Execution context handed to tools
pub struct ToolContext<'a> {
    /// Browser session the tool operates on
    pub session: &'a BrowserSession,

    /// Last captured snapshot, reused until the page changes
    snapshot: Option<Snapshot>,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session, snapshot: None }
    }

    /// Snapshot under `root_selector`, captured on first use
    pub fn get_snapshot(&mut self, root_selector: &str) -> Result<&Snapshot> {
        let stale = self
            .snapshot
            .as_ref()
            .is_none_or(|s| s.root_selector != root_selector);

        if stale {
            self.snapshot = Some(self.session.bounding_boxes(root_selector)?);
        }

        self.snapshot
            .as_ref()
            .ok_or_else(|| BrowserError::SnapshotFailed("Snapshot unavailable".to_string()))
    }

    /// Drop the cached snapshot, e.g. after navigation or scrolling
    pub fn invalidate_snapshot(&mut self) {
        self.snapshot = None;
    }
}

/// A browser automation tool with typed parameters
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema;

    /// Name the tool is registered under
    fn name(&self) -> &str;

    /// JSON schema of [`Tool::Params`]
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// Deserialize `params` and run the tool
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed: Self::Params = serde_json::from_value(params)
            .map_err(|e| BrowserError::InvalidParameters(format!("{}: {}", self.name(), e)))?;
        self.execute_typed(typed, context)
    }
}

/// Object-safe view of [`Tool`], used for storage in the registry
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        Tool::execute(self, params, context)
    }
}

/// Ordered set of tools addressable by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NavigateTool);
        registry.register(GetBoundingBoxesTool);
        registry.register(FindContainerTool);
        registry.register(ScreenshotElementTool);
        registry.register(ScreenshotChildrenTool);
        registry.register(AnnotateContainerTool);
        registry.register(HighlightTool);
        registry.register(ScrollTool);
        registry.register(PageInfoTool);
        registry.register(GetMarkdownTool);
        registry
    }

    /// Add a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = Tool::name(&tool).to_string();
        self.tools.insert(name, Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run the tool registered under `name`
    pub fn execute(&self, name: &str, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let tool = self.get(name).ok_or_else(|| BrowserError::ToolNotFound(name.to_string()))?;
        log::debug!("Executing tool '{}'", name);
        tool.execute(params, context)
    }
}
