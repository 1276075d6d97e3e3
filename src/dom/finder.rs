use crate::dom::bounding_box::BoundingBox;
use crate::dom::tree::{SelectorType, direct_children, find_by_selector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default bound on the number of elements a search may visit
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Classification of a container search outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContainerFinderResult {
    /// Reached an element with more than one direct child
    Success,
    /// Reached a childless element without meeting a branching point
    LeafNodeFound,
    /// The start selector matched nothing in the snapshot
    SelectorNotFound,
    /// The snapshot was empty
    InvalidSelector,
    /// The single-child chain was longer than the configured depth
    DepthLimitReached,
}

impl ContainerFinderResult {
    /// Whether this outcome carries a container
    pub fn has_container(&self) -> bool {
        matches!(self, ContainerFinderResult::Success | ContainerFinderResult::LeafNodeFound)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerFinderResult::Success => "success",
            ContainerFinderResult::LeafNodeFound => "leaf_node_found",
            ContainerFinderResult::SelectorNotFound => "selector_not_found",
            ContainerFinderResult::InvalidSelector => "invalid_selector",
            ContainerFinderResult::DepthLimitReached => "depth_limit_reached",
        }
    }
}

impl fmt::Display for ContainerFinderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one [`ContainerFinder::find_container`] call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContainerSearchResult {
    pub result_type: ContainerFinderResult,

    /// Present only for `Success` and `LeafNodeFound`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<BoundingBox>,

    /// Every element visited, start and terminal inclusive
    pub search_path: Vec<BoundingBox>,

    pub message: String,

    /// Always equal to `search_path.len()`
    pub depth: usize,
}

impl ContainerSearchResult {
    fn terminal(
        result_type: ContainerFinderResult,
        container: Option<BoundingBox>,
        search_path: Vec<BoundingBox>,
        message: String,
    ) -> Self {
        let depth = search_path.len();
        Self {
            result_type,
            container,
            search_path,
            message,
            depth,
        }
    }

    /// Whether the search ended on a container (branching point or leaf)
    pub fn is_success(&self) -> bool {
        self.result_type.has_container()
    }

    /// XPaths of the visited elements, in visiting order
    pub fn path_xpaths(&self) -> Vec<&str> {
        self.search_path.iter().map(|b| b.xpath.as_str()).collect()
    }
}

/// Walks single-child chains down from a start element until the first branching point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerFinder {
    max_depth: usize,
}

impl Default for ContainerFinder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl ContainerFinder {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Search `boxes` for the container enclosing the element matched by `start_selector`
    pub fn find_container(
        &self,
        boxes: &[BoundingBox],
        start_selector: &str,
        selector_type: SelectorType,
    ) -> ContainerSearchResult {
        if boxes.is_empty() {
            return ContainerSearchResult::terminal(
                ContainerFinderResult::InvalidSelector,
                None,
                Vec::new(),
                "No bounding boxes provided".to_string(),
            );
        }

        let Some(start) = find_by_selector(boxes, start_selector, selector_type) else {
            log::debug!("Start selector '{}' ({}) not in snapshot", start_selector, selector_type);
            return ContainerSearchResult::terminal(
                ContainerFinderResult::SelectorNotFound,
                None,
                Vec::new(),
                format!("Selector '{}' not found", start_selector),
            );
        };

        let result = self.walk(boxes, start);
        log::debug!(
            "Container search from '{}' ended with {} after {} step(s)",
            start_selector,
            result.result_type,
            result.depth
        );
        result
    }

    fn walk<'a>(&self, boxes: &'a [BoundingBox], start: &'a BoundingBox) -> ContainerSearchResult {
        let mut path: Vec<BoundingBox> = Vec::new();
        let mut current = start;

        loop {
            path.push(current.clone());

            if path.len() > self.max_depth {
                return ContainerSearchResult::terminal(
                    ContainerFinderResult::DepthLimitReached,
                    None,
                    path,
                    format!("Maximum depth reached ({})", self.max_depth),
                );
            }

            let children = direct_children(boxes, current);
            match children.as_slice() {
                [] => {
                    return ContainerSearchResult::terminal(
                        ContainerFinderResult::LeafNodeFound,
                        Some(current.clone()),
                        path,
                        "Leaf node found (0 children)".to_string(),
                    );
                }
                [only] => current = *only,
                many => {
                    return ContainerSearchResult::terminal(
                        ContainerFinderResult::Success,
                        Some(current.clone()),
                        path,
                        format!("Container found with {} children", many.len()),
                    );
                }
            }
        }
    }
}
