//! Drawing container outlines onto page screenshots.

use crate::dom::bounding_box::BoundingBox;
use crate::error::{BrowserError, Result};
use image::{ImageOutputFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::io::Cursor;

const CONTAINER_COLOR: Rgba<u8> = Rgba([231, 76, 60, 255]);
const CHILD_COLOR: Rgba<u8> = Rgba([51, 87, 255, 255]);

/// Border thickness in pixels for the container outline
const CONTAINER_STROKE: i32 = 3;

/// Outline `container` and its `children` on a PNG/JPEG screenshot and return PNG bytes.
///
/// Box coordinates are page-absolute, so `origin` is the page position of the
/// screenshot's top-left pixel (`(0, 0)` for a full-page capture).
pub fn annotate_screenshot(
    screenshot: &[u8],
    origin: (i64, i64),
    container: &BoundingBox,
    children: &[&BoundingBox],
) -> Result<Vec<u8>> {
    let mut canvas = image::load_from_memory(screenshot)
        .map_err(|e| BrowserError::ScreenshotFailed(format!("Failed to decode screenshot: {}", e)))?
        .to_rgba8();

    for child in children {
        outline(&mut canvas, child, origin, 1, CHILD_COLOR);
    }
    outline(&mut canvas, container, origin, CONTAINER_STROKE, CONTAINER_COLOR);

    let mut encoded = Vec::new();
    image::DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut encoded), ImageOutputFormat::Png)
        .map_err(|e| BrowserError::ScreenshotFailed(format!("Failed to encode annotated image: {}", e)))?;
    Ok(encoded)
}

fn outline(canvas: &mut RgbaImage, bbox: &BoundingBox, origin: (i64, i64), stroke: i32, color: Rgba<u8>) {
    for inset in 0..stroke {
        let width = bbox.width - 2 * i64::from(inset);
        let height = bbox.height - 2 * i64::from(inset);
        if width <= 0 || height <= 0 {
            break;
        }
        let rect = Rect::at(
            (bbox.x - origin.0) as i32 + inset,
            (bbox.y - origin.1) as i32 + inset,
        )
        .of_size(width as u32, height as u32);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_annotate_draws_outlines() {
        let container = BoundingBox::new("ul", "/html/body/ul[1]").with_geometry(10, 10, 80, 60);
        let child = BoundingBox::new("li", "/html/body/ul[1]/li[1]").with_geometry(20, 20, 30, 20);

        let png = annotate_screenshot(&blank_png(100, 100), (0, 0), &container, &[&child]).unwrap();
        let out = image::load_from_memory(&png).unwrap().to_rgba8();

        assert_eq!(out.dimensions(), (100, 100));
        assert_eq!(*out.get_pixel(10, 10), CONTAINER_COLOR);
        assert_eq!(*out.get_pixel(12, 40), CONTAINER_COLOR);
        assert_eq!(*out.get_pixel(20, 25), CHILD_COLOR);
        assert_eq!(*out.get_pixel(50, 50), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_annotate_applies_origin() {
        let container = BoundingBox::new("ul", "/html/body/ul[1]").with_geometry(510, 1010, 20, 20);
        let png = annotate_screenshot(&blank_png(50, 50), (500, 1000), &container, &[]).unwrap();
        let out = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(*out.get_pixel(10, 10), CONTAINER_COLOR);
    }

    #[test]
    fn test_annotate_skips_degenerate_boxes() {
        let container = BoundingBox::new("ul", "/html/body/ul[1]").with_geometry(0, 0, 0, 0);
        assert!(annotate_screenshot(&blank_png(10, 10), (0, 0), &container, &[]).is_ok());
    }

    #[test]
    fn test_annotate_rejects_non_image() {
        let container = BoundingBox::new("ul", "/html/body/ul[1]");
        let err = annotate_screenshot(b"not an image", (0, 0), &container, &[]).unwrap_err();
        assert!(matches!(err, BrowserError::ScreenshotFailed(_)));
    }
}
