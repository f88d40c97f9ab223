use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

/// A point in canvas-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x as f32, self.y as f32)
    }
}

impl From<egui::Pos2> for Coordinate {
    fn from(pos: egui::Pos2) -> Self {
        Self::new(pos.x as f64, pos.y as f64)
    }
}

/// Canvas dimensions in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    #[serde(rename = "Width")]
    pub width: u32,
    #[serde(rename = "Height")]
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn to_vec2(self) -> egui::Vec2 {
        egui::vec2(self.width as f32, self.height as f32)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// The kinds of shape a user can draw.
///
/// Written as the variant name. Reading also accepts the numeric form `0`, `1`, `2` in
/// declaration order, which older template files use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Line => "Line",
        }
    }

    /// Rectangles and ellipses are stored as a normalized bounding box.
    pub fn is_boxed(&self) -> bool {
        !matches!(self, ShapeKind::Line)
    }
}

const SHAPE_KIND_NAMES: &[&str] = &["Rectangle", "Ellipse", "Line"];

struct ShapeKindVisitor;

impl Visitor<'_> for ShapeKindVisitor {
    type Value = ShapeKind;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a shape type name or an index from 0 to 2")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ShapeKind, E> {
        match v {
            0 => Ok(ShapeKind::Rectangle),
            1 => Ok(ShapeKind::Ellipse),
            2 => Ok(ShapeKind::Line),
            _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ShapeKind, E> {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Err(E::invalid_value(Unexpected::Signed(v), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ShapeKind, E> {
        match v {
            "Rectangle" => Ok(ShapeKind::Rectangle),
            "Ellipse" => Ok(ShapeKind::Ellipse),
            "Line" => Ok(ShapeKind::Line),
            _ => Err(E::unknown_variant(v, SHAPE_KIND_NAMES)),
        }
    }
}

impl<'de> Deserialize<'de> for ShapeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ShapeKindVisitor)
    }
}

/// Stroke drawn around a shape. Colors are packed `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    #[serde(rename = "Color")]
    pub color: u32,
    #[serde(rename = "Thickness")]
    pub thickness: f64,
}

impl Outline {
    pub const fn new(color: u32, thickness: f64) -> Self {
        Self { color, thickness }
    }
}

/// One drawn shape, as held in the layer list and written to template files.
///
/// For rectangles and ellipses `a` is the top-left and `b` the bottom-right corner of
/// the bounding box. For lines `a` and `b` are the endpoints in the order they were drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    #[serde(rename = "ShapeType")]
    pub kind: ShapeKind,
    #[serde(rename = "A")]
    pub a: Coordinate,
    #[serde(rename = "B")]
    pub b: Coordinate,
    #[serde(rename = "Outline")]
    pub outline: Option<Outline>,
    #[serde(rename = "BackgroundColor")]
    pub fill: Option<u32>,
}

impl ShapeDescriptor {
    /// Build a boxed shape from two arbitrary corners, normalizing them first.
    pub fn boxed(kind: ShapeKind, start: Coordinate, end: Coordinate) -> Self {
        let (top_left, bottom_right) = normalize(start, end);
        Self {
            kind,
            a: top_left,
            b: bottom_right,
            outline: None,
            fill: None,
        }
    }

    pub fn line(start: Coordinate, end: Coordinate, outline: Outline) -> Self {
        Self {
            kind: ShapeKind::Line,
            a: start,
            b: end,
            outline: Some(outline),
            fill: None,
        }
    }

    /// Build a shape of any kind from a drag gesture. Lines keep the endpoints as given.
    pub fn from_drag(kind: ShapeKind, start: Coordinate, end: Coordinate) -> Self {
        match kind {
            ShapeKind::Line => Self {
                kind,
                a: start,
                b: end,
                outline: None,
                fill: None,
            },
            ShapeKind::Rectangle | ShapeKind::Ellipse => Self::boxed(kind, start, end),
        }
    }

    /// Reorder the corners of a boxed shape into top-left and bottom-right. Lines are untouched.
    pub fn normalized(self) -> Self {
        if !self.kind.is_boxed() {
            return self;
        }
        let (a, b) = normalize(self.a, self.b);
        Self { a, b, ..self }
    }

    pub fn with_outline(self, outline: Option<Outline>) -> Self {
        Self { outline, ..self }
    }

    pub fn with_fill(self, fill: Option<u32>) -> Self {
        Self { fill, ..self }
    }

    pub fn is_filled(&self) -> bool {
        self.fill.is_some()
    }

    /// Top-left and bottom-right corners. Lines have no box.
    pub fn bounding_box(&self) -> Option<(Coordinate, Coordinate)> {
        self.kind.is_boxed().then_some((self.a, self.b))
    }

    /// Center and semi-axes of the ellipse inscribed in the bounding box.
    pub fn ellipse_parameters(&self) -> EllipseParameters {
        let radius_x = (self.b.x - self.a.x).abs() / 2.0;
        let radius_y = (self.b.y - self.a.y).abs() / 2.0;
        EllipseParameters {
            center: Coordinate::new(
                self.a.x + (self.b.x - self.a.x) / 2.0,
                self.a.y + (self.b.y - self.a.y) / 2.0,
            ),
            radius_x,
            radius_y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseParameters {
    pub center: Coordinate,
    pub radius_x: f64,
    pub radius_y: f64,
}

/// Turn two drag points into a `(top_left, bottom_right)` pair.
///
/// Ties on X fall to the right-hand cases and ties on Y to the upper cases.
pub fn normalize(start: Coordinate, end: Coordinate) -> (Coordinate, Coordinate) {
    if start.x > end.x {
        if start.y < end.y {
            // lower left: start is the top-right corner
            (
                Coordinate::new(end.x, start.y),
                Coordinate::new(start.x, end.y),
            )
        } else {
            // upper left
            (end, start)
        }
    } else if start.y < end.y {
        // lower right
        (start, end)
    } else {
        // upper right: start is the bottom-left corner
        (
            Coordinate::new(start.x, end.y),
            Coordinate::new(end.x, start.y),
        )
    }
}
