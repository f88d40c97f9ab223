mod distance;
pub mod hit_testing;

pub use distance::{
    ELLIPSE_ITERATIONS, closest_point_on_ellipse, distance_to_ellipse, distance_to_line,
    distance_to_line_segment,
};
pub use hit_testing::{HIT_TOLERANCE_FACTOR, hit_test, topmost_hit};
