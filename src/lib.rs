//! # container-finder
//!
//! Locates the structural container of a repeated collection (a product grid, an
//! article list, a search result column) in a live web page driven through the
//! Chrome DevTools Protocol.
//!
//! ## How it works
//!
//! 1. Every visible element under a root selector is captured as a [`BoundingBox`]
//!    (CSS path, 1-based XPath, page geometry, direct child count).
//! 2. Starting from an element inside the region of interest, [`ContainerFinder`]
//!    descends through single-child wrappers and stops at the first element with
//!    several direct children: that element is the container.
//! 3. The outcome is summarised as a [`ContainerAnalysis`] and can be exported as
//!    JSON or CSV, outlined on a screenshot, or used to screenshot each child.
//!
//! ## MCP Server
//!
//! ```bash
//! # Run headless browser over stdio
//! cargo run --features mcp-server --bin mcp-server
//!
//! # Run with visible browser (useful for debugging)
//! cargo run --features mcp-server --bin mcp-server -- --headed
//! ```
//!
//! ## Command line
//!
//! ```bash
//! container-finder find https://example.com/shop --start "/html/body/main[1]" --selector-type xpath
//! container-finder boxes https://example.com/shop --csv boxes.csv
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use container_finder::{BrowserSession, ContainerFinder, LaunchOptions, SelectorType};
//!
//! # fn main() -> container_finder::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com/shop")?;
//! session.wait_for_navigation()?;
//!
//! let snapshot = session.bounding_boxes("body")?;
//! let analysis = snapshot.analyze(&ContainerFinder::default(), "/html/body/main[1]", SelectorType::Xpath);
//! println!("{}", analysis.message);
//! # Ok(())
//! # }
//! ```
//!
//! The finder itself needs no browser; boxes can come from anywhere:
//!
//! ```rust
//! use container_finder::{BoundingBox, ContainerFinder, ContainerFinderResult, SelectorType};
//!
//! let boxes = vec![
//!     BoundingBox::new("html > body > ul", "/html/body/ul[1]").with_children(2),
//!     BoundingBox::new("html > body > ul > li:nth-of-type(1)", "/html/body/ul[1]/li[1]"),
//!     BoundingBox::new("html > body > ul > li:nth-of-type(2)", "/html/body/ul[1]/li[2]"),
//! ];
//!
//! let result = ContainerFinder::default().find_container(&boxes, "/html/body/ul[1]", SelectorType::Xpath);
//! assert_eq!(result.result_type, ContainerFinderResult::Success);
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and configuration
//! - [`dom`]: Bounding boxes, tree queries, the container finder and its reports
//! - [`tools`]: Registry of typed tools shared by the MCP server
//! - [`error`]: Error types and result aliases
//! - [`mcp`]: Model Context Protocol server (requires `mcp-handler` feature)

pub mod browser;
pub mod dom;
pub mod error;
pub mod tools;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use dom::{
    BoundingBox, ContainerAnalysis, ContainerFinder, ContainerFinderResult, ContainerSearchResult, SelectorType,
    Snapshot,
};
pub use error::{BrowserError, Result};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};

#[cfg(feature = "mcp-handler")]
pub use mcp::BrowserServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
