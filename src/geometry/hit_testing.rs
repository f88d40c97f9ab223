use crate::shape::{CanvasSize, Coordinate, ShapeDescriptor, ShapeKind};

use super::distance::{distance_to_ellipse, distance_to_line};

/// Fraction of the canvas size within which a click counts as touching an outline.
pub const HIT_TOLERANCE_FACTOR: f64 = 0.05;

/// Tolerance for ellipse outlines and lines: 5% of the larger canvas dimension.
fn tolerance(viewport: CanvasSize) -> f64 {
    (viewport.width as f64 * HIT_TOLERANCE_FACTOR).max(viewport.height as f64 * HIT_TOLERANCE_FACTOR)
}

/// Whether `point` touches `shape` for the purposes of erasing it.
pub fn hit_test(shape: &ShapeDescriptor, point: Coordinate, viewport: CanvasSize) -> bool {
    match shape.kind {
        ShapeKind::Rectangle => hit_test_rectangle(shape, point, viewport),
        ShapeKind::Ellipse => hit_test_ellipse(shape, point, viewport),
        ShapeKind::Line => hit_test_line(shape, point, viewport),
    }
}

/// Index of the last shape in `shapes` that `point` touches.
///
/// Later shapes are painted on top, so the last match wins.
pub fn topmost_hit(shapes: &[ShapeDescriptor], point: Coordinate, viewport: CanvasSize) -> Option<usize> {
    let mut found = None;
    for (idx, shape) in shapes.iter().enumerate() {
        if hit_test(shape, point, viewport) {
            found = Some(idx);
        }
    }
    found
}

/// Distance to the line through `p1` and `p2`, or to the point itself when they coincide.
fn distance_to_edge(p1: Coordinate, p2: Coordinate, point: Coordinate) -> f64 {
    if p1 == p2 {
        return point.distance(p1);
    }
    distance_to_line(p1, p2, point)
}

fn hit_test_line(shape: &ShapeDescriptor, point: Coordinate, viewport: CanvasSize) -> bool {
    distance_to_edge(shape.a, shape.b, point) < tolerance(viewport)
}

fn hit_test_ellipse(shape: &ShapeDescriptor, point: Coordinate, viewport: CanvasSize) -> bool {
    let params = shape.ellipse_parameters();

    if shape.is_filled() {
        let dx = point.x - params.center.x;
        let dy = point.y - params.center.y;
        let result = dx * dx / (params.radius_x * params.radius_x)
            + dy * dy / (params.radius_y * params.radius_y);

        result < 1.0
    } else {
        let distance = distance_to_ellipse(params.center, params.radius_x, params.radius_y, point);
        distance < tolerance(viewport)
    }
}

fn hit_test_rectangle(shape: &ShapeDescriptor, point: Coordinate, viewport: CanvasSize) -> bool {
    let top_left = shape.a;
    let bottom_right = shape.b;

    if shape.is_filled() {
        return point.x >= top_left.x
            && point.x <= bottom_right.x
            && point.y >= top_left.y
            && point.y <= bottom_right.y;
    }

    let top_right = Coordinate::new(bottom_right.x, top_left.y);
    let bottom_left = Coordinate::new(top_left.x, bottom_right.y);

    let dist_left = distance_to_edge(top_left, bottom_left, point);
    let dist_top = distance_to_edge(top_left, top_right, point);
    let dist_right = distance_to_edge(top_right, bottom_right, point);
    let dist_bottom = distance_to_edge(bottom_right, bottom_left, point);

    // Vertical sides use the width threshold, horizontal sides the height threshold.
    let w_threshold = viewport.width as f64 * HIT_TOLERANCE_FACTOR;
    let h_threshold = viewport.height as f64 * HIT_TOLERANCE_FACTOR;

    dist_left < w_threshold
        || dist_top < h_threshold
        || dist_right < w_threshold
        || dist_bottom < h_threshold
}
