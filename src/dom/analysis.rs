use crate::dom::bounding_box::BoundingBox;
use crate::dom::finder::{ContainerFinderResult, ContainerSearchResult};
use serde::{Deserialize, Serialize};

/// Structured summary of a container search, ready for JSON or tabular output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContainerAnalysis {
    /// True for `Success` and `LeafNodeFound`
    pub success: bool,
    pub result_type: ContainerFinderResult,
    pub message: String,
    pub search_depth: usize,
    pub search_path_length: usize,
    pub container_info: Option<ContainerInfo>,
    pub search_path: Vec<PathEntry>,
}

/// Identity and geometry of the found container
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContainerInfo {
    pub css_selector: String,
    pub xpath: String,
    pub tag: String,
    pub area: i64,
    pub num_children: usize,
    pub dimensions: Dimensions,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimensions {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// One visited element, reduced to what is useful when reading a trace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathEntry {
    pub xpath: String,
    pub tag: String,
    pub num_children: usize,
}

impl From<&BoundingBox> for ContainerInfo {
    fn from(bbox: &BoundingBox) -> Self {
        Self {
            css_selector: bbox.css_selector.clone(),
            xpath: bbox.xpath.clone(),
            tag: bbox.tag.clone(),
            area: bbox.area(),
            num_children: bbox.num_children,
            dimensions: Dimensions {
                x: bbox.x,
                y: bbox.y,
                width: bbox.width,
                height: bbox.height,
            },
        }
    }
}

impl From<&BoundingBox> for PathEntry {
    fn from(bbox: &BoundingBox) -> Self {
        Self {
            xpath: bbox.xpath.clone(),
            tag: bbox.tag.clone(),
            num_children: bbox.num_children,
        }
    }
}

impl From<&ContainerSearchResult> for ContainerAnalysis {
    fn from(result: &ContainerSearchResult) -> Self {
        Self {
            success: result.is_success(),
            result_type: result.result_type,
            message: result.message.clone(),
            search_depth: result.depth,
            search_path_length: result.search_path.len(),
            container_info: result.container.as_ref().map(ContainerInfo::from),
            search_path: result.search_path.iter().map(PathEntry::from).collect(),
        }
    }
}

impl ContainerAnalysis {
    /// Serialize the analysis as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
