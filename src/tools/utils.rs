use crate::dom::BoundingBox;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

/// Normalize an incomplete URL by adding missing protocol and handling common patterns
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();

    if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || trimmed.starts_with("file://")
        || trimmed.starts_with("data:")
        || trimmed.starts_with("about:")
        || trimmed.starts_with("chrome://")
        || trimmed.starts_with("chrome-extension://")
    {
        return trimmed.to_string();
    }

    // Relative path - return as-is
    if trimmed.starts_with('/') || trimmed.starts_with("./") || trimmed.starts_with("../") {
        return trimmed.to_string();
    }

    if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") {
        return format!("http://{}", trimmed);
    }

    if trimmed.contains('.') {
        return format!("https://{}", trimmed);
    }

    // Single word: "google" -> "https://www.google.com"
    format!("https://www.{}.com", trimmed)
}

/// Stable, filesystem-safe file stem for a CSS selector
pub fn selector_file_stem(css_selector: &str) -> String {
    let digest = Sha256::digest(css_selector.trim().as_bytes());
    hex::encode(&digest[..8])
}

/// Compact JSON view of a box, as returned by tools
pub fn box_summary(bbox: &BoundingBox) -> Value {
    json!({
        "css_selector": bbox.css_selector,
        "xpath": bbox.xpath,
        "tag": bbox.tag,
        "x": bbox.x,
        "y": bbox.y,
        "width": bbox.width,
        "height": bbox.height,
        "area": bbox.area(),
        "num_children": bbox.num_children,
    })
}

pub(crate) fn default_root_selector() -> String {
    "body".to_string()
}

pub(crate) fn default_max_depth() -> usize {
    crate::dom::DEFAULT_MAX_DEPTH
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_complete() {
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com/path"), "http://example.com/path");
    }

    #[test]
    fn test_normalize_url_missing_protocol() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("www.bulgari.com/en-us/jewelry"), "https://www.bulgari.com/en-us/jewelry");
    }

    #[test]
    fn test_normalize_url_partial_domain() {
        assert_eq!(normalize_url("google"), "https://www.google.com");
    }

    #[test]
    fn test_normalize_url_localhost() {
        assert_eq!(normalize_url("localhost:3000"), "http://localhost:3000");
        assert_eq!(normalize_url("127.0.0.1:8080"), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_normalize_url_special_protocols() {
        assert_eq!(normalize_url("about:blank"), "about:blank");
        assert_eq!(normalize_url("data:text/html,<h1>Test</h1>"), "data:text/html,<h1>Test</h1>");
        assert_eq!(normalize_url("file:///tmp/page.html"), "file:///tmp/page.html");
    }

    #[test]
    fn test_normalize_url_whitespace() {
        assert_eq!(normalize_url("  example.com  "), "https://example.com");
    }

    #[test]
    fn test_selector_file_stem() {
        let a = selector_file_stem("html > body > ul > li");
        let b = selector_file_stem("  html > body > ul > li ");
        let c = selector_file_stem("html > body > ul > li:nth-of-type(2)");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn test_box_summary() {
        let bbox = BoundingBox::new("html > body", "/html/body").with_geometry(0, 0, 10, 20);
        let summary = box_summary(&bbox);
        assert_eq!(summary["area"], 200);
        assert_eq!(summary["xpath"], "/html/body");
    }
}
