use crate::error::BrowserError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vertical scroll target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// Scroll to the top of the document
    Up,
    /// Scroll to the bottom of the document
    Down,
}

impl ScrollDirection {
    pub(crate) fn script(&self) -> &'static str {
        match self {
            ScrollDirection::Up => "window.scrollTo(0, 0)",
            ScrollDirection::Down => "window.scrollTo(0, document.body.scrollHeight)",
        }
    }
}

/// Image encoding for element screenshots
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Jpeg => write!(f, "jpeg"),
        }
    }
}

impl FromStr for ImageFormat {
    type Err = BrowserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            other => Err(BrowserError::InvalidArgument(format!("Unsupported image format '{}'", other))),
        }
    }
}

/// Full document size (not just the viewport)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageDimensions {
    pub width: i64,
    pub height: i64,
}

/// Description of the page being analysed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageInfo {
    /// Caller supplied category, e.g. `LISTING` or `ARTICLE`
    pub page_type: String,
    pub url: String,
    pub width: i64,
    pub height: i64,
}

impl PageInfo {
    pub fn new(page_type: impl Into<String>, url: impl Into<String>, dimensions: PageDimensions) -> Self {
        Self {
            page_type: page_type.into(),
            url: url.into(),
            width: dimensions.width,
            height: dimensions.height,
        }
    }

    pub fn area(&self) -> i64 {
        self.width * self.height
    }
}
