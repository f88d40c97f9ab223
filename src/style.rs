use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::shape::{Outline, ShapeDescriptor, ShapeKind};

/// The tool selected in the tools panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Rectangle,
    Ellipse,
    Line,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Rectangle, Tool::Ellipse, Tool::Line, Tool::Eraser];

    /// The shape a completed drag produces, or `None` for tools that draw nothing.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Ellipse => Some(ShapeKind::Ellipse),
            Tool::Line => Some(ShapeKind::Line),
            Tool::Eraser => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tool::Rectangle => "▭ Rectangle",
            Tool::Ellipse => "◯ Ellipse",
            Tool::Line => "╱ Line",
            Tool::Eraser => "⌫ Eraser",
        }
    }
}

/// How a newly finished shape is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillMode {
    /// Filled with the primary color, no outline.
    Filled,
    /// Outlined with the primary color, no fill.
    #[default]
    Outline,
    /// Filled with the primary color and outlined with the secondary color.
    FilledOutline,
}

impl FillMode {
    pub const ALL: [FillMode; 3] = [FillMode::Filled, FillMode::Outline, FillMode::FilledOutline];

    pub fn label(&self) -> &'static str {
        match self {
            FillMode::Filled => "Filled",
            FillMode::Outline => "Outline",
            FillMode::FilledOutline => "Filled + outline",
        }
    }
}

/// Active tool and paint settings, edited from the tools panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfiguration {
    pub tool: Tool,
    pub fill_mode: FillMode,
    /// Packed `0xAARRGGBB`.
    pub primary_color: u32,
    /// Packed `0xAARRGGBB`.
    pub secondary_color: u32,
    pub brush_width: u32,
}

impl Default for StyleConfiguration {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            fill_mode: FillMode::default(),
            primary_color: 0xFF000000,
            secondary_color: 0xFFFF0000,
            brush_width: 3,
        }
    }
}

impl StyleConfiguration {
    /// Outline used for lines: primary color at the brush width, whatever the fill mode.
    pub fn line_outline(&self) -> Outline {
        Outline::new(self.primary_color, self.brush_width as f64)
    }

    /// Assign fill and outline to `shape` according to the fill mode.
    ///
    /// Lines have no fill; they always get the primary-colored outline.
    pub fn apply(&self, shape: ShapeDescriptor) -> ShapeDescriptor {
        if shape.kind == ShapeKind::Line {
            return shape
                .with_fill(None)
                .with_outline(Some(self.line_outline()));
        }

        let width = self.brush_width as f64;
        match self.fill_mode {
            FillMode::Filled => shape.with_fill(Some(self.primary_color)).with_outline(None),
            FillMode::Outline => shape
                .with_fill(None)
                .with_outline(Some(Outline::new(self.primary_color, width))),
            FillMode::FilledOutline => shape
                .with_fill(Some(self.primary_color))
                .with_outline(Some(Outline::new(self.secondary_color, width))),
        }
    }
}

/// Unpack a `0xAARRGGBB` color.
pub fn color_from_argb(argb: u32) -> Color32 {
    let [a, r, g, b] = argb.to_be_bytes();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Pack a color as `0xAARRGGBB`.
pub fn argb_from_color(color: Color32) -> u32 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    u32::from_be_bytes([a, r, g, b])
}
