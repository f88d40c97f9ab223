use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::document::Document;
use crate::error::ExportError;
use crate::geometry::{distance_to_ellipse, distance_to_line_segment};
use crate::renderer::RenderInstruction;
use crate::shape::{Coordinate, ShapeKind};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Largest RGBA buffer export will allocate (1 GiB).
pub const MAX_EXPORT_BYTES: u64 = 1 << 30;

/// Rasterize the document and write it to `path`. The format follows the file extension.
pub fn export_image(document: &Document, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let image = rasterize(document)?;
    image.save(path)?;
    log::info!(
        "Exported {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// Paint every layer onto a white canvas the size of the document.
pub fn rasterize(document: &Document) -> Result<RgbaImage, ExportError> {
    let size = document.size();
    if size.width == 0 || size.height == 0 {
        return Err(ExportError::EmptyCanvas {
            width: size.width,
            height: size.height,
        });
    }

    let bytes = u64::from(size.width)
        .checked_mul(u64::from(size.height))
        .and_then(|pixels| pixels.checked_mul(4));
    if bytes.is_none_or(|bytes| bytes > MAX_EXPORT_BYTES) {
        return Err(ExportError::TooLarge {
            width: size.width,
            height: size.height,
        });
    }

    let mut image = RgbaImage::from_pixel(size.width, size.height, BACKGROUND);
    for shape in document.layers() {
        let instruction = RenderInstruction::from(shape);
        if let Some(fill) = instruction.fill {
            paint(&mut image, &instruction, 0.0, fill, covers_fill);
        }
        if let Some((color, thickness)) = instruction.outline {
            paint(&mut image, &instruction, thickness / 2.0, color, covers_outline);
        }
    }
    Ok(image)
}

/// Blend `argb` into every pixel whose center `covers` reports as inside the shape.
fn paint(
    image: &mut RgbaImage,
    instruction: &RenderInstruction,
    half_width: f64,
    argb: u32,
    covers: fn(&RenderInstruction, Coordinate, f64) -> bool,
) {
    let min_x = instruction.a.x.min(instruction.b.x) - half_width;
    let max_x = instruction.a.x.max(instruction.b.x) + half_width;
    let min_y = instruction.a.y.min(instruction.b.y) - half_width;
    let max_y = instruction.a.y.max(instruction.b.y) + half_width;

    let x0 = min_x.floor().max(0.0) as u32;
    let y0 = min_y.floor().max(0.0) as u32;
    let x1 = (max_x.ceil().max(0.0) as u32).min(image.width());
    let y1 = (max_y.ceil().max(0.0) as u32).min(image.height());

    for y in y0..y1 {
        for x in x0..x1 {
            let center = Coordinate::new(x as f64 + 0.5, y as f64 + 0.5);
            if covers(instruction, center, half_width) {
                blend(image.get_pixel_mut(x, y), argb);
            }
        }
    }
}

fn covers_fill(instruction: &RenderInstruction, p: Coordinate, _half_width: f64) -> bool {
    let (a, b) = (instruction.a, instruction.b);
    match instruction.kind {
        ShapeKind::Rectangle => p.x >= a.x && p.x <= b.x && p.y >= a.y && p.y <= b.y,
        ShapeKind::Ellipse => {
            let rx = (b.x - a.x).abs() / 2.0;
            let ry = (b.y - a.y).abs() / 2.0;
            let dx = p.x - (a.x + b.x) / 2.0;
            let dy = p.y - (a.y + b.y) / 2.0;
            (dx * dx) / (rx * rx) + (dy * dy) / (ry * ry) <= 1.0
        }
        ShapeKind::Line => false,
    }
}

fn covers_outline(instruction: &RenderInstruction, p: Coordinate, half_width: f64) -> bool {
    let (a, b) = (instruction.a, instruction.b);
    match instruction.kind {
        ShapeKind::Rectangle => {
            let in_outer = p.x >= a.x - half_width
                && p.x <= b.x + half_width
                && p.y >= a.y - half_width
                && p.y <= b.y + half_width;
            let in_inner = p.x > a.x + half_width
                && p.x < b.x - half_width
                && p.y > a.y + half_width
                && p.y < b.y - half_width;
            in_outer && !in_inner
        }
        ShapeKind::Ellipse => {
            let center = Coordinate::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
            let rx = (b.x - a.x).abs() / 2.0;
            let ry = (b.y - a.y).abs() / 2.0;
            distance_to_ellipse(center, rx, ry, p) <= half_width
        }
        ShapeKind::Line => distance_to_line_segment(p, a, b) <= half_width,
    }
}

/// Source-over blend of a packed `0xAARRGGBB` color onto an opaque pixel.
fn blend(pixel: &mut Rgba<u8>, argb: u32) {
    let [a, r, g, b] = argb.to_be_bytes();
    let alpha = a as f32 / 255.0;
    for (channel, src) in pixel.0.iter_mut().take(3).zip([r, g, b]) {
        *channel = (src as f32 * alpha + *channel as f32 * (1.0 - alpha)).round() as u8;
    }
    pixel.0[3] = 255;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{CanvasSize, Outline, ShapeDescriptor};

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_empty_canvas_is_rejected() {
        let doc = Document::new(CanvasSize::new(0, 10));
        assert!(matches!(
            rasterize(&doc),
            Err(ExportError::EmptyCanvas { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_oversized_canvas_is_rejected() {
        let max = i32::MAX as u32;
        let doc = Document::new(CanvasSize::new(max, max));
        assert!(matches!(
            rasterize(&doc),
            Err(ExportError::TooLarge { width, height }) if width == max && height == max
        ));

        // One row past the limit
        let doc = Document::new(CanvasSize::new(16_384, 16_385));
        assert!(matches!(rasterize(&doc), Err(ExportError::TooLarge { .. })));
    }

    #[test]
    fn test_filled_rectangle_pixels() {
        let mut doc = Document::new(CanvasSize::new(20, 20));
        doc.add_layer(
            ShapeDescriptor::boxed(ShapeKind::Rectangle, c(2.0, 2.0), c(10.0, 10.0))
                .with_fill(Some(0xFFFF0000)),
        );
        let image = rasterize(&doc).unwrap();
        assert_eq!(image.get_pixel(5, 5), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(15, 15), &BACKGROUND);
    }

    #[test]
    fn test_later_layers_paint_on_top() {
        let mut doc = Document::new(CanvasSize::new(20, 20));
        let square = ShapeDescriptor::boxed(ShapeKind::Rectangle, c(0.0, 0.0), c(20.0, 20.0));
        doc.add_layer(square.with_fill(Some(0xFFFF0000)));
        doc.add_layer(square.with_fill(Some(0xFF0000FF)));
        let image = rasterize(&doc).unwrap();
        assert_eq!(image.get_pixel(10, 10), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_transparent_fill_leaves_background() {
        let mut doc = Document::new(CanvasSize::new(4, 4));
        doc.add_layer(
            ShapeDescriptor::boxed(ShapeKind::Rectangle, c(0.0, 0.0), c(4.0, 4.0))
                .with_fill(Some(0x00000000)),
        );
        let image = rasterize(&doc).unwrap();
        assert_eq!(image.get_pixel(1, 1), &BACKGROUND);
    }

    #[test]
    fn test_outline_leaves_interior_untouched() {
        let mut doc = Document::new(CanvasSize::new(40, 40));
        doc.add_layer(
            ShapeDescriptor::boxed(ShapeKind::Ellipse, c(0.0, 0.0), c(40.0, 40.0))
                .with_outline(Some(Outline::new(0xFF000000, 2.0))),
        );
        let image = rasterize(&doc).unwrap();
        assert_eq!(image.get_pixel(20, 20), &BACKGROUND);
        // Leftmost point of the circle
        assert_eq!(image.get_pixel(0, 19), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_line_is_bounded() {
        let mut doc = Document::new(CanvasSize::new(30, 10));
        doc.add_layer(ShapeDescriptor::line(
            c(0.0, 5.0),
            c(10.0, 5.0),
            Outline::new(0xFF000000, 2.0),
        ));
        let image = rasterize(&doc).unwrap();
        assert_eq!(image.get_pixel(5, 4), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(25, 4), &BACKGROUND);
    }

    #[test]
    fn test_export_writes_png() {
        let path = std::env::temp_dir().join(format!("eframe_shapes_export_{}.png", std::process::id()));
        let mut doc = Document::new(CanvasSize::new(8, 8));
        doc.add_layer(
            ShapeDescriptor::boxed(ShapeKind::Rectangle, c(0.0, 0.0), c(4.0, 4.0))
                .with_fill(Some(0xFF00FF00)),
        );
        export_image(&doc, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (8, 8));
        assert_eq!(loaded.get_pixel(1, 1), &Rgba([0, 255, 0, 255]));
        let _ = std::fs::remove_file(&path);
    }
}
