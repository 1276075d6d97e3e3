//! CSV exports of snapshots and search traces.

use crate::dom::analysis::ContainerAnalysis;
use crate::dom::bounding_box::BoundingBox;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct BoxRow<'a> {
    xpath: &'a str,
    css_selector: &'a str,
    tag: &'a str,
    x: i64,
    y: i64,
    width: i64,
    height: i64,
    area: i64,
    num_children: usize,
}

#[derive(Serialize)]
struct PathRow<'a> {
    step: usize,
    result_type: &'a str,
    xpath: &'a str,
    tag: &'a str,
    num_children: usize,
}

/// Write one row per bounding box, in the order given, including the derived area
pub fn write_bounding_boxes_csv<'a, W, I>(writer: W, boxes: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a BoundingBox>,
{
    let mut csv = csv::Writer::from_writer(writer);
    for bbox in boxes {
        csv.serialize(BoxRow {
            xpath: &bbox.xpath,
            css_selector: &bbox.css_selector,
            tag: &bbox.tag,
            x: bbox.x,
            y: bbox.y,
            width: bbox.width,
            height: bbox.height,
            area: bbox.area(),
            num_children: bbox.num_children,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the search path of an analysis, one row per visited element
pub fn write_search_path_csv<W: Write>(writer: W, analysis: &ContainerAnalysis) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for (step, entry) in analysis.search_path.iter().enumerate() {
        csv.serialize(PathRow {
            step: step + 1,
            result_type: analysis.result_type.as_str(),
            xpath: &entry.xpath,
            tag: &entry.tag,
            num_children: entry.num_children,
        })?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::finder::ContainerFinder;
    use crate::dom::tree::SelectorType;

    fn boxes() -> Vec<BoundingBox> {
        vec![
            BoundingBox::new("html > body > div", "/html/body/div[1]")
                .with_tag("<div class=\"a, b\">")
                .with_geometry(0, 0, 100, 40)
                .with_children(2),
            BoundingBox::new("html > body > div > p", "/html/body/div[1]/p[1]").with_geometry(0, 0, 100, 20),
            BoundingBox::new("html > body > div > p:nth-of-type(2)", "/html/body/div[1]/p[2]")
                .with_geometry(0, 20, 100, 20),
        ]
    }

    #[test]
    fn test_bounding_boxes_csv() {
        let mut out = Vec::new();
        write_bounding_boxes_csv(&mut out, &boxes()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "xpath,css_selector,tag,x,y,width,height,area,num_children");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("/html/body/div[1],html > body > div,\"<div class=\"\"a, b\"\">\""));
        assert!(lines[1].ends_with(",4000,2"));
    }

    #[test]
    fn test_search_path_csv() {
        let boxes = boxes();
        let result = ContainerFinder::default().find_container(&boxes, "/html/body/div[1]", SelectorType::Xpath);
        let analysis = ContainerAnalysis::from(&result);

        let mut out = Vec::new();
        write_search_path_csv(&mut out, &analysis).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().next(), Some("step,result_type,xpath,tag,num_children"));
        assert!(text.contains("1,success,/html/body/div[1]"));
    }

    #[test]
    fn test_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxes.csv");
        let file = std::fs::File::create(&path).unwrap();
        write_bounding_boxes_csv(file, &boxes()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 4);
    }
}
