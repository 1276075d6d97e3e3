//! Structural queries over a flat list of bounding boxes.
//!
//! No tree is materialised: parent/child relations are recovered on demand
//! from XPath prefixes and segment counts.

use crate::dom::bounding_box::BoundingBox;
use crate::error::BrowserError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which field of a bounding box a selector is matched against
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectorType {
    /// Match against the full CSS path
    #[default]
    Css,
    /// Match against the absolute XPath
    Xpath,
}

impl fmt::Display for SelectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorType::Css => write!(f, "css"),
            SelectorType::Xpath => write!(f, "xpath"),
        }
    }
}

impl FromStr for SelectorType {
    type Err = BrowserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "css" => Ok(SelectorType::Css),
            "xpath" => Ok(SelectorType::Xpath),
            other => Err(BrowserError::InvalidArgument(format!(
                "Unknown selector type '{}', expected 'css' or 'xpath'",
                other
            ))),
        }
    }
}

/// Return every box exactly one XPath segment below `parent`, in input order
pub fn direct_children<'a>(boxes: &'a [BoundingBox], parent: &BoundingBox) -> Vec<&'a BoundingBox> {
    boxes.iter().filter(|bbox| bbox.is_direct_child_of(parent)).collect()
}

/// Find the first box whose CSS path or XPath equals `selector` exactly
pub fn find_by_selector<'a>(
    boxes: &'a [BoundingBox],
    selector: &str,
    selector_type: SelectorType,
) -> Option<&'a BoundingBox> {
    boxes.iter().find(|bbox| match selector_type {
        SelectorType::Css => bbox.css_selector == selector,
        SelectorType::Xpath => bbox.xpath == selector,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_boxes() -> Vec<BoundingBox> {
        vec![
            BoundingBox::new("html > body > div", "/html/body/div[1]").with_children(2),
            BoundingBox::new("html > body > div > span", "/html/body/div[1]/span[1]").with_children(1),
            BoundingBox::new("html > body > div > span > a", "/html/body/div[1]/span[1]/a[1]"),
            BoundingBox::new("html > body > div > span:nth-of-type(2)", "/html/body/div[1]/span[2]"),
            BoundingBox::new("html > body > div:nth-of-type(2)", "/html/body/div[2]"),
        ]
    }

    #[test]
    fn test_direct_children_exactness() {
        let boxes = sample_boxes();
        let children = direct_children(&boxes, &boxes[0]);

        let xpaths: Vec<_> = children.iter().map(|b| b.xpath.as_str()).collect();
        assert_eq!(xpaths, vec!["/html/body/div[1]/span[1]", "/html/body/div[1]/span[2]"]);
    }

    #[test]
    fn test_direct_children_preserves_input_order() {
        let mut boxes = sample_boxes();
        boxes.swap(1, 3);
        let children = direct_children(&boxes, &boxes[0]);

        assert_eq!(children[0].xpath, "/html/body/div[1]/span[2]");
        assert_eq!(children[1].xpath, "/html/body/div[1]/span[1]");
    }

    #[test]
    fn test_direct_children_of_foreign_box_is_empty() {
        let boxes = sample_boxes();
        let foreign = BoundingBox::new("html > body > section", "/html/body/section[4]");
        assert!(direct_children(&boxes, &foreign).is_empty());
    }

    #[test]
    fn test_direct_children_skips_index_prefix_lookalike() {
        let mut boxes = sample_boxes();
        boxes.push(BoundingBox::new("html > body > div:nth-of-type(10)", "/html/body/div[10]"));
        boxes.push(BoundingBox::new("html > body > div:nth-of-type(10) > p", "/html/body/div[10]/p[1]"));

        for parent in &boxes {
            let children = direct_children(&boxes, parent);
            let expected: Vec<_> = boxes.iter().filter(|b| b.is_direct_child_of(parent)).collect();
            assert_eq!(children, expected, "children of {}", parent.xpath);
        }
        assert_eq!(direct_children(&boxes, &boxes[0]).len(), 2);
    }

    #[test]
    fn test_direct_children_of_leaf_is_empty() {
        let boxes = sample_boxes();
        assert!(direct_children(&boxes, &boxes[2]).is_empty());
    }

    #[test]
    fn test_find_by_selector() {
        let boxes = sample_boxes();

        let by_xpath = find_by_selector(&boxes, "/html/body/div[2]", SelectorType::Xpath);
        assert_eq!(by_xpath.map(|b| b.css_selector.as_str()), Some("html > body > div:nth-of-type(2)"));

        let by_css = find_by_selector(&boxes, "html > body > div > span", SelectorType::Css);
        assert_eq!(by_css.map(|b| b.xpath.as_str()), Some("/html/body/div[1]/span[1]"));

        // CSS selector is not matched against XPath and vice versa
        assert!(find_by_selector(&boxes, "/html/body/div[2]", SelectorType::Css).is_none());
    }

    #[test]
    fn test_find_by_selector_is_exact() {
        let boxes = sample_boxes();
        assert!(find_by_selector(&boxes, " /html/body/div[2]", SelectorType::Xpath).is_none());
        assert!(find_by_selector(&boxes, "/html/body/div[2]/", SelectorType::Xpath).is_none());
        assert!(find_by_selector(&[], "/html", SelectorType::Xpath).is_none());
    }

    #[test]
    fn test_selector_type_parse() {
        assert_eq!("css".parse::<SelectorType>().unwrap(), SelectorType::Css);
        assert_eq!("XPath".parse::<SelectorType>().unwrap(), SelectorType::Xpath);
        assert!("id".parse::<SelectorType>().is_err());
        assert_eq!(SelectorType::Xpath.to_string(), "xpath");
    }

    #[test]
    fn test_selector_type_serde() {
        let value: SelectorType = serde_json::from_str("\"xpath\"").unwrap();
        assert_eq!(value, SelectorType::Xpath);
        assert_eq!(serde_json::to_string(&SelectorType::Css).unwrap(), "\"css\"");
    }
}
