use crate::shape::Coordinate;

/// Number of refinement steps used when searching for the nearest point on an ellipse.
pub const ELLIPSE_ITERATIONS: usize = 3;

/// Perpendicular distance from `p0` to the infinite line through `p1` and `p2`.
///
/// `p1` and `p2` must differ; a degenerate line divides by zero.
pub fn distance_to_line(p1: Coordinate, p2: Coordinate, p0: Coordinate) -> f64 {
    let top = ((p2.x - p1.x) * (p1.y - p0.y) - (p1.x - p0.x) * (p2.y - p1.y)).abs();
    let bottom = ((p2.x - p1.x) * (p2.x - p1.x) + (p2.y - p1.y) * (p2.y - p1.y)).sqrt();

    top / bottom
}

/// Distance from `point` to the segment between `start` and `end`, clamped to the endpoints.
pub fn distance_to_line_segment(point: Coordinate, start: Coordinate, end: Coordinate) -> f64 {
    let line_x = end.x - start.x;
    let line_y = end.y - start.y;
    let len_sq = line_x * line_x + line_y * line_y;
    if len_sq == 0.0 {
        return point.distance(start);
    }

    let t = (((point.x - start.x) * line_x + (point.y - start.y) * line_y) / len_sq).clamp(0.0, 1.0);
    point.distance(Coordinate::new(start.x + line_x * t, start.y + line_y * t))
}

/// Closest point on the boundary of an origin-centered ellipse to `p`.
///
/// Works in the first quadrant on `|p|` and mirrors the signs back onto the result.
pub fn closest_point_on_ellipse(radius_x: f64, radius_y: f64, p: Coordinate) -> Coordinate {
    let px = p.x.abs();
    let py = p.y.abs();
    let a = radius_x;
    let b = radius_y;

    // Flat ellipses collapse to a segment along the other axis.
    if a == 0.0 || b == 0.0 {
        return Coordinate::new(p.x.clamp(-a, a), p.y.clamp(-b, b));
    }

    let mut tx = std::f64::consts::FRAC_1_SQRT_2;
    let mut ty = std::f64::consts::FRAC_1_SQRT_2;

    let aa = a * a;
    let bb = b * b;

    for _ in 0..ELLIPSE_ITERATIONS {
        let x = a * tx;
        let y = b * ty;

        // evolute
        let ex = (aa - bb) * (tx * tx * tx) / a;
        let ey = (bb - aa) * (ty * ty * ty) / b;

        let rx = x - ex;
        let ry = y - ey;

        let qx = px - ex;
        let qy = py - ey;

        let r = (rx * rx + ry * ry).sqrt();
        let q = (qx * qx + qy * qy).sqrt();
        if q == 0.0 {
            break;
        }

        tx = ((qx * r / q + ex) / a).clamp(0.0, 1.0);
        ty = ((qy * r / q + ey) / b).clamp(0.0, 1.0);

        let t = (tx * tx + ty * ty).sqrt();
        tx /= t;
        ty /= t;
    }

    Coordinate::new(
        a * if p.x < 0.0 { -tx } else { tx },
        b * if p.y < 0.0 { -ty } else { ty },
    )
}

/// Distance from `p` to the boundary of the ellipse centered at `center`.
pub fn distance_to_ellipse(center: Coordinate, radius_x: f64, radius_y: f64, p: Coordinate) -> f64 {
    let translated = Coordinate::new(p.x - center.x, p.y - center.y);
    let nearest = closest_point_on_ellipse(radius_x, radius_y, translated);
    let on_boundary = Coordinate::new(nearest.x + center.x, nearest.y + center.y);

    on_boundary.distance(p)
}
