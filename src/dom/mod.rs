//! Bounding-box snapshots and container discovery
//!
//! This module provides functionality for capturing the visible geometry of a
//! web page and locating the structural container of a repeated collection.
//! It includes:
//! - BoundingBox: Geometric and structural record of one visible element
//! - tree: Direct-children and selector queries derived from XPath strings
//! - ContainerFinder: Walk down single-child chains to the first branching point
//! - ContainerAnalysis: Presentation payload for a search result
//! - Snapshot: Capture of all visible elements under a root selector

pub mod analysis;
pub mod annotate;
pub mod bounding_box;
pub mod finder;
pub mod report;
pub mod snapshot;
pub mod tree;

pub use analysis::{ContainerAnalysis, ContainerInfo, Dimensions, PathEntry};
pub use bounding_box::BoundingBox;
pub use finder::{ContainerFinder, ContainerFinderResult, ContainerSearchResult, DEFAULT_MAX_DEPTH};
pub use snapshot::Snapshot;
pub use tree::{SelectorType, direct_children, find_by_selector};
