use serde::{Deserialize, Serialize};

/// Geometric and structural record of one visible element, as captured from the page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Opening tag markup (e.g. `<div class="grid">`), for display only
    #[serde(default)]
    pub tag: String,

    /// Full CSS path from the document root
    pub css_selector: String,

    /// Absolute XPath from `/html`, using 1-based `/tag[n]` segments
    pub xpath: String,

    /// Page-absolute left coordinate
    pub x: i64,

    /// Page-absolute top coordinate
    pub y: i64,

    /// Rendered width in pixels
    pub width: i64,

    /// Rendered height in pixels
    pub height: i64,

    /// Number of immediate element children at capture time
    #[serde(default)]
    pub num_children: usize,
}

impl BoundingBox {
    /// Create a new BoundingBox identified by its CSS path and XPath
    pub fn new(css_selector: impl Into<String>, xpath: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            css_selector: css_selector.into(),
            xpath: xpath.into(),
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            num_children: 0,
        }
    }

    /// Builder method: set the opening tag markup
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Builder method: set position and size
    pub fn with_geometry(mut self, x: i64, y: i64, width: i64, height: i64) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    /// Builder method: set the captured child count
    pub fn with_children(mut self, num_children: usize) -> Self {
        self.num_children = num_children;
        self
    }

    /// Calculate the area of the bounding box
    pub fn area(&self) -> i64 {
        self.width * self.height
    }

    /// Number of `/` separators in the XPath, i.e. the element's depth in the document
    pub fn path_depth(&self) -> usize {
        self.xpath.matches('/').count()
    }

    /// Whether `self` sits exactly one XPath segment below `parent`
    pub fn is_direct_child_of(&self, parent: &BoundingBox) -> bool {
        match self.xpath.strip_prefix(parent.xpath.as_str()) {
            Some(rest) => rest.starts_with('/') && self.path_depth() == parent.path_depth() + 1,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_area() {
        let bbox = BoundingBox::new("html > body", "/html/body").with_geometry(10, 20, 100, 50);

        assert_eq!(bbox.area(), 5000);

        let flat = BoundingBox::new("html > body > hr", "/html/body/hr[1]").with_geometry(0, 0, 300, 0);
        assert_eq!(flat.area(), 0);
    }

    #[test]
    fn test_path_depth() {
        assert_eq!(BoundingBox::new("html", "/html").path_depth(), 1);
        assert_eq!(BoundingBox::new("", "/html/body/div[2]/div[1]").path_depth(), 4);
    }

    #[test]
    fn test_is_direct_child_of() {
        let parent = BoundingBox::new("", "/html/body/div[1]");
        let child = BoundingBox::new("", "/html/body/div[1]/span[2]");
        let grandchild = BoundingBox::new("", "/html/body/div[1]/span[1]/a[1]");
        let sibling = BoundingBox::new("", "/html/body/div[2]");
        let lookalike = BoundingBox::new("", "/html/body/div[10]/span[1]");

        assert!(child.is_direct_child_of(&parent));
        assert!(!grandchild.is_direct_child_of(&parent));
        assert!(!sibling.is_direct_child_of(&parent));
        assert!(!lookalike.is_direct_child_of(&parent));
        assert!(!parent.is_direct_child_of(&parent));
    }

    #[test]
    fn test_deserialize_capture_record() {
        let json = r#"{
            "tag": "<div class=\"grid\">",
            "css_selector": "html > body > div",
            "xpath": "/html/body/div[1]",
            "x": 0, "y": 120, "width": 1280, "height": 900,
            "num_children": 12
        }"#;

        let bbox: BoundingBox = serde_json::from_str(json).unwrap();
        assert_eq!(bbox.tag, "<div class=\"grid\">");
        assert_eq!(bbox.y, 120);
        assert_eq!(bbox.num_children, 12);
        assert_eq!(bbox.area(), 1280 * 900);
    }
}
