use container_finder::dom::annotate::annotate_screenshot;
use container_finder::tools::{ToolContext, ToolRegistry};
use container_finder::{BoundingBox, BrowserSession, ContainerFinder, ContainerFinderResult, LaunchOptions, SelectorType};

/// `main > section > ul` with three sized list items
const GRID_PAGE: &str = "data:text/html,<html><body style='margin:0'>\
<main style='display:block;width:600px'><section style='display:block'>\
<ul style='margin:0;padding:0'>\
<li style='display:block;height:100px'>One</li>\
<li style='display:block;height:100px'>Two</li>\
<li style='display:block;height:100px'>Three</li>\
</ul></section></main></body></html>";

fn open_grid() -> BrowserSession {
    let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
    session.navigate(GRID_PAGE).expect("Failed to navigate");
    session.wait_for_navigation().expect("Failed to wait for navigation");
    session
}

fn main_box(boxes: &[BoundingBox]) -> &BoundingBox {
    boxes
        .iter()
        .find(|b| b.tag.starts_with("<main"))
        .expect("main element not captured")
}

#[test]
fn test_finder_through_public_api() {
    let boxes = vec![
        BoundingBox::new("html > body > main", "/html/body/main[1]").with_children(1),
        BoundingBox::new("html > body > main > ul", "/html/body/main[1]/ul[1]").with_children(2),
        BoundingBox::new("html > body > main > ul > li", "/html/body/main[1]/ul[1]/li[1]"),
        BoundingBox::new("html > body > main > ul > li:nth-of-type(2)", "/html/body/main[1]/ul[1]/li[2]"),
    ];

    let result = ContainerFinder::default().find_container(&boxes, "html > body > main", SelectorType::Css);

    assert_eq!(result.result_type, ContainerFinderResult::Success);
    assert_eq!(result.container.unwrap().xpath, "/html/body/main[1]/ul[1]");
    assert_eq!(result.depth, 2);
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_snapshot_capture() {
    let session = open_grid();
    let snapshot = session.bounding_boxes("body").expect("Failed to capture boxes");

    assert!(!snapshot.is_empty());
    let main = main_box(snapshot.boxes.as_slice());
    assert_eq!(main.width, 600);
    assert_eq!(main.num_children, 1);

    let items: Vec<_> = snapshot.iter().filter(|b| b.tag.starts_with("<li")).collect();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|b| b.height == 100));
}

#[test]
#[ignore]
fn test_invalid_root_selector_yields_empty_snapshot() {
    let session = open_grid();
    let snapshot = session.bounding_boxes(" ,, ").expect("Failed to capture boxes");
    assert!(snapshot.is_empty());

    let snapshot = session.bounding_boxes("div[[").expect("Failed to capture boxes");
    assert!(snapshot.is_empty());
}

#[test]
#[ignore]
fn test_find_container_on_live_page() {
    let session = open_grid();
    let snapshot = session.bounding_boxes("body").expect("Failed to capture boxes");
    let start = main_box(snapshot.boxes.as_slice()).xpath.clone();

    let result = snapshot.find_container(&ContainerFinder::default(), &start, SelectorType::Xpath);

    assert_eq!(result.result_type, ContainerFinderResult::Success);
    let container = result.container.expect("container");
    assert!(container.tag.starts_with("<ul"));
    // main, section, ul
    assert_eq!(result.depth, 3);
    assert_eq!(snapshot.direct_children(&container).len(), 3);
}

#[test]
#[ignore]
fn test_find_container_tool() {
    let session = open_grid();
    let registry = ToolRegistry::with_defaults();
    let mut context = ToolContext::new(&session);

    let result = registry
        .execute(
            "find_container",
            serde_json::json!({"start_selector": "html > body > main"}),
            &mut context,
        )
        .expect("Tool execution failed");

    assert!(result.success);
    let data = result.data.expect("data");
    assert_eq!(data["result_type"], "success");
    assert_eq!(data["children"].as_array().map(Vec::len), Some(3));

    let missing = registry
        .execute(
            "find_container",
            serde_json::json!({"start_selector": "html > body > nav"}),
            &mut context,
        )
        .expect("Tool execution failed");
    assert!(!missing.success);
    assert_eq!(missing.error.as_deref(), Some("Selector 'html > body > nav' not found"));
}

#[test]
#[ignore]
fn test_screenshot_children() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = open_grid();

    let result = session
        .execute_tool(
            "screenshot_children",
            serde_json::json!({
                "start_selector": "html > body > main",
                "output_dir": dir.path().display().to_string()
            }),
        )
        .expect("Tool execution failed");

    assert!(result.success);
    let data = result.data.expect("data");
    assert_eq!(data["captured"], 3);

    let pngs = std::fs::read_dir(dir.path())
        .expect("read_dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "png"))
        .count();
    assert_eq!(pngs, 3);
}

#[test]
#[ignore]
fn test_nested_roots_capture_each_element_once() {
    let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
    session
        .navigate(
            "data:text/html,<html><body><div id='a'><div id='b'>\
             <p>one</p><p>two</p></div></div></body></html>",
        )
        .expect("Failed to navigate");
    session.wait_for_navigation().expect("Failed to wait for navigation");

    let snapshot = session.bounding_boxes("div").expect("Failed to capture boxes");
    let mut xpaths: Vec<_> = snapshot.iter().map(|b| b.xpath.as_str()).collect();
    let captured = xpaths.len();
    xpaths.sort_unstable();
    xpaths.dedup();
    assert_eq!(xpaths.len(), captured);
    assert_eq!(captured, 4);

    let result = snapshot.find_container(&ContainerFinder::default(), "/html/body/div[1]", SelectorType::Xpath);
    assert_eq!(result.result_type, ContainerFinderResult::Success);
    assert_eq!(result.container.expect("container").xpath, "/html/body/div[1]/div[1]");
    assert_eq!(result.depth, 2);
}

#[test]
#[ignore]
fn test_screenshot_children_survives_failed_capture() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
    // The middle item is visible through its padding but has an empty content box
    session
        .navigate(
            "data:text/html,<html><body style='margin:0'><ul style='margin:0;padding:0'>\
             <li style='display:block;height:100px'>One</li>\
             <li style='display:block;width:0;height:0;padding:20px'></li>\
             <li style='display:block;height:100px'>Three</li>\
             </ul></body></html>",
        )
        .expect("Failed to navigate");
    session.wait_for_navigation().expect("Failed to wait for navigation");

    let result = session
        .execute_tool(
            "screenshot_children",
            serde_json::json!({
                "start_selector": "html > body > ul",
                "output_dir": dir.path().display().to_string()
            }),
        )
        .expect("one failed capture must not abort the batch");

    assert!(result.success);
    let data = result.data.expect("data");
    let shots = data["screenshots"].as_array().expect("screenshots");
    assert_eq!(shots.len(), 3);
    assert!(!shots[0]["image_path"].is_null());
    assert!(!shots[2]["image_path"].is_null());
}

#[test]
#[ignore]
fn test_annotate_full_page() {
    let session = open_grid();
    let snapshot = session.bounding_boxes("body").expect("Failed to capture boxes");
    let start = main_box(snapshot.boxes.as_slice()).css_selector.clone();
    let result = snapshot.find_container(&ContainerFinder::default(), &start, SelectorType::Css);
    let container = result.container.expect("container");
    let children = snapshot.direct_children(&container);

    let (screenshot, dimensions) = session.capture_full_page().expect("Failed to capture page");
    let png = annotate_screenshot(&screenshot, (0, 0), &container, &children).expect("Failed to annotate");

    let image = image::load_from_memory(&png).expect("annotated image decodes");
    assert_eq!(image.width() as i64, dimensions.width);
}

#[test]
#[ignore]
fn test_get_markdown() {
    let session = open_grid();
    let result = session
        .execute_tool("get_markdown", serde_json::json!({}))
        .expect("Tool execution failed");

    assert!(result.success);
    let markdown = result.data.expect("data")["markdown"].as_str().unwrap_or_default().to_string();
    assert!(markdown.contains("Two"));
}
