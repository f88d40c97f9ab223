use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::shape::{Coordinate, ShapeDescriptor, ShapeKind};
use crate::state::EditorContext;
use crate::style::color_from_argb;

/// Everything the painter needs to draw one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderInstruction {
    pub kind: ShapeKind,
    pub a: Coordinate,
    pub b: Coordinate,
    pub fill: Option<u32>,
    pub outline: Option<(u32, f64)>,
}

impl From<&ShapeDescriptor> for RenderInstruction {
    fn from(shape: &ShapeDescriptor) -> Self {
        Self {
            kind: shape.kind,
            a: shape.a,
            b: shape.b,
            fill: shape.fill,
            outline: shape.outline.map(|outline| (outline.color, outline.thickness)),
        }
    }
}

/// Render instructions for every layer in paint order, followed by the drag preview.
pub fn render_instructions(ctx: &EditorContext) -> Vec<RenderInstruction> {
    ctx.document()
        .layers()
        .iter()
        .chain(ctx.styled_preview().as_ref())
        .map(RenderInstruction::from)
        .collect()
}

#[derive(Debug)]
pub struct Renderer {
    background: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
        }
    }
}

impl Renderer {
    /// Paint the canvas background and all shapes, offset so that canvas (0, 0) lands on
    /// `canvas_rect.min`.
    pub fn render(&self, painter: &Painter, canvas_rect: Rect, ctx: &EditorContext) {
        painter.rect_filled(canvas_rect, 0.0, self.background);

        let offset = canvas_rect.min.to_vec2();
        let painter = painter.with_clip_rect(canvas_rect.intersect(painter.clip_rect()));
        for instruction in render_instructions(ctx) {
            painter.add(self.shape_for(&instruction, offset));
        }
    }

    /// Convert one instruction into an egui shape in screen space.
    pub fn shape_for(&self, instruction: &RenderInstruction, offset: Vec2) -> Shape {
        let a = instruction.a.to_pos2() + offset;
        let b = instruction.b.to_pos2() + offset;
        let fill = instruction.fill.map(color_from_argb).unwrap_or(Color32::TRANSPARENT);
        let stroke = instruction
            .outline
            .map(|(color, thickness)| Stroke::new(thickness as f32, color_from_argb(color)))
            .unwrap_or(Stroke::NONE);

        match instruction.kind {
            ShapeKind::Rectangle => {
                let rect = Rect::from_two_pos(a, b);
                Shape::Vec(vec![
                    Shape::rect_filled(rect, 0.0, fill),
                    Shape::rect_stroke(rect, 0.0, stroke),
                ])
            }
            ShapeKind::Ellipse => {
                let center = Pos2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
                let radius = egui::vec2((b.x - a.x).abs() / 2.0, (b.y - a.y).abs() / 2.0);
                Shape::Ellipse(egui::epaint::EllipseShape {
                    center,
                    radius,
                    fill,
                    stroke,
                })
            }
            ShapeKind::Line => Shape::line_segment([a, b], stroke),
        }
    }
}
