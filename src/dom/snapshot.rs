use crate::dom::analysis::ContainerAnalysis;
use crate::dom::bounding_box::BoundingBox;
use crate::dom::finder::{ContainerFinder, ContainerSearchResult};
use crate::dom::report;
use crate::dom::tree::{self, SelectorType};
use crate::error::{BrowserError, Result};
use headless_chrome::Tab;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;

const EXTRACT_BOUNDING_BOXES_JS: &str = include_str!("extract_bounding_boxes.js");

/// Point-in-time set of bounding boxes for every visible element under a root selector
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    /// Selector the capture started from (e.g. `body`)
    pub root_selector: String,

    /// Captured boxes, in document order
    pub boxes: Vec<BoundingBox>,
}

impl Snapshot {
    /// Create a snapshot from already captured boxes.
    ///
    /// Boxes repeating an earlier XPath are dropped, first occurrence wins.
    pub fn new(root_selector: impl Into<String>, boxes: Vec<BoundingBox>) -> Self {
        let mut seen = HashSet::with_capacity(boxes.len());
        let total = boxes.len();
        let boxes: Vec<BoundingBox> = boxes.into_iter().filter(|b| seen.insert(b.xpath.clone())).collect();
        if boxes.len() < total {
            log::debug!("Dropped {} duplicate box(es)", total - boxes.len());
        }

        Self {
            root_selector: root_selector.into(),
            boxes,
        }
    }

    /// Capture the visible elements under `root_selector` in the given tab
    pub fn from_tab(tab: &Arc<Tab>, root_selector: &str) -> Result<Self> {
        let argument = serde_json::to_string(root_selector)?;
        let js_code = format!("{}({})", EXTRACT_BOUNDING_BOXES_JS.trim(), argument);

        let result = tab
            .evaluate(&js_code, false)
            .map_err(|e| BrowserError::SnapshotFailed(format!("Failed to execute capture script: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| BrowserError::SnapshotFailed("No value returned from capture script".to_string()))?;

        // The script returns a JSON string, not an object
        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| BrowserError::SnapshotFailed(format!("Failed to get JSON string: {}", e)))?;

        let snapshot = Self::from_json(root_selector, &json_str)?;
        log::debug!("Captured {} visible element(s) under '{}'", snapshot.len(), root_selector);
        Ok(snapshot)
    }

    /// Parse the JSON array produced by the capture script
    pub fn from_json(root_selector: &str, json: &str) -> Result<Self> {
        let boxes: Vec<BoundingBox> = serde_json::from_str(json)
            .map_err(|e| BrowserError::SnapshotFailed(format!("Failed to parse bounding boxes: {}", e)))?;
        Ok(Self::new(root_selector, boxes))
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundingBox> {
        self.boxes.iter()
    }

    /// Boxes sorted by area, largest first. The snapshot itself is left untouched.
    pub fn sorted_by_area(&self) -> Vec<&BoundingBox> {
        let mut sorted: Vec<&BoundingBox> = self.boxes.iter().collect();
        sorted.sort_by(|a, b| b.area().cmp(&a.area()));
        sorted
    }

    /// Direct structural children of `parent` within this snapshot
    pub fn direct_children(&self, parent: &BoundingBox) -> Vec<&BoundingBox> {
        tree::direct_children(&self.boxes, parent)
    }

    /// Exact lookup by CSS path or XPath
    pub fn find_by_selector(&self, selector: &str, selector_type: SelectorType) -> Option<&BoundingBox> {
        tree::find_by_selector(&self.boxes, selector, selector_type)
    }

    /// Run `finder` over this snapshot
    pub fn find_container(
        &self,
        finder: &ContainerFinder,
        start_selector: &str,
        selector_type: SelectorType,
    ) -> ContainerSearchResult {
        finder.find_container(&self.boxes, start_selector, selector_type)
    }

    /// Run `finder` and summarise the outcome
    pub fn analyze(&self, finder: &ContainerFinder, start_selector: &str, selector_type: SelectorType) -> ContainerAnalysis {
        ContainerAnalysis::from(&self.find_container(finder, start_selector, selector_type))
    }

    /// Convert the snapshot to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the snapshot as CSV, largest boxes first
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        report::write_bounding_boxes_csv(writer, self.sorted_by_area())
    }
}
