//! Owned application state and the pointer handling that drives it.
//!
//! `EditorContext` holds the open [`Document`], the active [`StyleConfiguration`] and the
//! [`EditorState`] of the current drag. Pointer events go in through `pointer_down`,
//! `pointer_move` and `pointer_up`; each reports what happened as a [`PointerOutcome`].

use crate::document::Document;
use crate::shape::{Coordinate, ShapeDescriptor, ShapeKind};
use crate::style::{FillMode, StyleConfiguration, Tool};

use super::EditorState;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum StateTransitionError {
    /// The requested state transition is not allowed from the current state
    InvalidTransition { from: &'static str, to: &'static str },
}

/// What a pointer event did to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Nothing changed
    Ignored,
    /// A drag started
    Started,
    /// The preview shape was updated
    Previewed,
    /// A shape was finished and appended to the document
    Finished(ShapeDescriptor),
    /// A drag ended without producing a shape
    Abandoned,
    /// The eraser removed a shape
    Erased(ShapeDescriptor),
}

impl PointerOutcome {
    pub fn needs_repaint(&self) -> bool {
        !matches!(self, PointerOutcome::Ignored)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditorContext {
    state: EditorState,
    document: Document,
    style: StyleConfiguration,
}

impl EditorContext {
    pub fn new(document: Document, style: StyleConfiguration) -> Self {
        Self {
            state: EditorState::Idle,
            document,
            style,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn style(&self) -> &StyleConfiguration {
        &self.style
    }

    /// Swap in a new or loaded document. Any drag in progress is dropped.
    pub fn replace_document(&mut self, document: Document) -> Document {
        self.cancel_drag();
        std::mem::replace(&mut self.document, document)
    }

    /// Switching tools drops any drag in progress, so the eraser never finishes a shape.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.style.tool != tool {
            log::debug!("Tool changed: {:?} -> {:?}", self.style.tool, tool);
            self.cancel_drag();
            self.style.tool = tool;
        }
    }

    pub fn set_fill_mode(&mut self, fill_mode: FillMode) {
        log::debug!("Fill mode changed to {:?}", fill_mode);
        self.style.fill_mode = fill_mode;
    }

    pub fn set_primary_color(&mut self, argb: u32) {
        self.style.primary_color = argb;
    }

    pub fn set_secondary_color(&mut self, argb: u32) {
        self.style.secondary_color = argb;
    }

    pub fn set_brush_width(&mut self, width: u32) {
        self.style.brush_width = width;
    }

    /// Attempts to transition to a new state, rejecting moves the state machine forbids.
    pub fn transition_to(&mut self, new_state: EditorState) -> Result<(), StateTransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(StateTransitionError::InvalidTransition {
                from: self.state.name(),
                to: new_state.name(),
            });
        }
        self.state = new_state;
        Ok(())
    }

    pub fn pointer_down(&mut self, point: Coordinate, is_primary: bool) -> PointerOutcome {
        if !is_primary || !self.state.is_idle() {
            return PointerOutcome::Ignored;
        }

        let Some(kind) = self.style.tool.shape_kind() else {
            return match self.document.erase_at(point) {
                Some(removed) => PointerOutcome::Erased(removed),
                None => PointerOutcome::Ignored,
            };
        };

        match self.transition_to(EditorState::Dragging {
            kind,
            start: point,
            preview: None,
        }) {
            Ok(()) => PointerOutcome::Started,
            Err(err) => {
                log::warn!("Could not start drag: {:?}", err);
                PointerOutcome::Ignored
            }
        }
    }

    pub fn pointer_move(&mut self, point: Coordinate) -> PointerOutcome {
        let EditorState::Dragging { kind, start, .. } = self.state else {
            return PointerOutcome::Ignored;
        };

        let preview = self.preview_shape(kind, start, point);
        self.state = EditorState::Dragging {
            kind,
            start,
            preview: Some(preview),
        };
        PointerOutcome::Previewed
    }

    pub fn pointer_up(&mut self, point: Coordinate, is_primary: bool) -> PointerOutcome {
        let EditorState::Dragging { kind, start, .. } = self.state else {
            return PointerOutcome::Ignored;
        };

        if let Err(err) = self.transition_to(EditorState::Idle) {
            log::warn!("Could not finish drag: {:?}", err);
            return PointerOutcome::Ignored;
        }

        if !is_primary {
            log::debug!("Drag abandoned by non-primary release");
            return PointerOutcome::Abandoned;
        }

        let shape = finalize_shape(self.style.tool, kind, start, point, &self.style);
        log::debug!("Finished {} from {:?} to {:?}", shape.kind.name(), shape.a, shape.b);
        self.document.add_layer(shape);
        PointerOutcome::Finished(shape)
    }

    /// Drop the drag in progress without producing a shape.
    pub fn cancel_drag(&mut self) {
        if self.state.is_dragging() {
            log::debug!("Drag cancelled");
            self.state = EditorState::Idle;
        }
    }

    /// Preview shape painted while dragging.
    ///
    /// Rectangles and ellipses keep unstyled geometry until they are finished, so the
    /// current style is applied here for display only.
    pub fn styled_preview(&self) -> Option<ShapeDescriptor> {
        self.state.preview().map(|shape| match shape.kind {
            ShapeKind::Line => *shape,
            ShapeKind::Rectangle | ShapeKind::Ellipse => self.style.apply(*shape),
        })
    }

    fn preview_shape(&self, kind: ShapeKind, start: Coordinate, current: Coordinate) -> ShapeDescriptor {
        match kind {
            ShapeKind::Line => ShapeDescriptor::line(start, current, self.style.line_outline()),
            ShapeKind::Rectangle | ShapeKind::Ellipse => ShapeDescriptor::boxed(kind, start, current),
        }
    }
}

/// Build the finished shape for a drag and apply the style to it.
///
/// # Panics
///
/// If `tool` draws no shape. The eraser acts on pointer down and must never get here.
pub fn finalize_shape(
    tool: Tool,
    kind: ShapeKind,
    start: Coordinate,
    end: Coordinate,
    style: &StyleConfiguration,
) -> ShapeDescriptor {
    if tool.shape_kind().is_none() {
        panic!("Tool {:?} creates no shape", tool);
    }
    style.apply(ShapeDescriptor::from_drag(kind, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{CanvasSize, Outline};

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn context(tool: Tool, fill_mode: FillMode) -> EditorContext {
        let style = StyleConfiguration {
            tool,
            fill_mode,
            primary_color: 0xFF000000,
            secondary_color: 0xFFFF0000,
            brush_width: 3,
        };
        EditorContext::new(Document::new(CanvasSize::new(200, 200)), style)
    }

    #[test]
    fn test_drag_finishes_rectangle() {
        let mut ctx = context(Tool::Rectangle, FillMode::FilledOutline);

        assert_eq!(ctx.pointer_down(c(50.0, 60.0), true), PointerOutcome::Started);
        assert!(ctx.state().is_dragging());
        assert!(ctx.state().preview().is_none());

        assert_eq!(ctx.pointer_move(c(10.0, 20.0)), PointerOutcome::Previewed);
        let preview = *ctx.state().preview().unwrap();
        assert_eq!((preview.a, preview.b), (c(10.0, 20.0), c(50.0, 60.0)));
        assert_eq!(preview.fill, None);
        assert_eq!(preview.outline, None);

        let PointerOutcome::Finished(shape) = ctx.pointer_up(c(10.0, 20.0), true) else {
            panic!("expected a finished shape");
        };
        assert_eq!((shape.a, shape.b), (preview.a, preview.b));
        assert_eq!(shape.fill, Some(0xFF000000));
        assert_eq!(shape.outline, Some(Outline::new(0xFFFF0000, 3.0)));
        assert!(ctx.state().is_idle());
        assert_eq!(ctx.document().layers(), &[shape]);
    }

    #[test]
    fn test_line_preview_carries_outline() {
        let mut ctx = context(Tool::Line, FillMode::Filled);
        ctx.pointer_down(c(30.0, 30.0), true);
        ctx.pointer_move(c(5.0, 40.0));

        let preview = *ctx.state().preview().unwrap();
        assert_eq!(preview.a, c(30.0, 30.0));
        assert_eq!(preview.b, c(5.0, 40.0));
        assert_eq!(preview.outline, Some(Outline::new(0xFF000000, 3.0)));

        let PointerOutcome::Finished(line) = ctx.pointer_up(c(5.0, 40.0), true) else {
            panic!("expected a finished line");
        };
        assert_eq!(line, preview);
    }

    #[test]
    fn test_non_primary_release_abandons() {
        let mut ctx = context(Tool::Ellipse, FillMode::Outline);
        ctx.pointer_down(c(0.0, 0.0), true);
        ctx.pointer_move(c(10.0, 10.0));
        assert_eq!(ctx.pointer_up(c(10.0, 10.0), false), PointerOutcome::Abandoned);
        assert!(ctx.state().is_idle());
        assert!(ctx.document().is_empty());
    }

    #[test]
    fn test_non_primary_press_ignored() {
        let mut ctx = context(Tool::Rectangle, FillMode::Outline);
        assert_eq!(ctx.pointer_down(c(0.0, 0.0), false), PointerOutcome::Ignored);
        assert!(ctx.state().is_idle());
        assert_eq!(ctx.pointer_move(c(3.0, 3.0)), PointerOutcome::Ignored);
        assert_eq!(ctx.pointer_up(c(3.0, 3.0), true), PointerOutcome::Ignored);
    }

    #[test]
    fn test_eraser_never_drags() {
        let mut ctx = context(Tool::Rectangle, FillMode::Filled);
        ctx.pointer_down(c(0.0, 0.0), true);
        ctx.pointer_up(c(40.0, 40.0), true);
        assert_eq!(ctx.document().len(), 1);

        ctx.set_tool(Tool::Eraser);
        assert!(matches!(ctx.pointer_down(c(20.0, 20.0), true), PointerOutcome::Erased(_)));
        assert!(ctx.state().is_idle());
        assert!(ctx.document().is_empty());
        assert_eq!(ctx.pointer_down(c(20.0, 20.0), true), PointerOutcome::Ignored);
    }

    #[test]
    fn test_tool_change_cancels_drag() {
        let mut ctx = context(Tool::Rectangle, FillMode::Filled);
        ctx.pointer_down(c(0.0, 0.0), true);
        ctx.pointer_move(c(5.0, 5.0));
        ctx.set_tool(Tool::Eraser);
        assert!(ctx.state().is_idle());
        assert_eq!(ctx.pointer_up(c(5.0, 5.0), true), PointerOutcome::Ignored);
        assert!(ctx.document().is_empty());
    }

    #[test]
    fn test_styled_preview_uses_current_style() {
        let mut ctx = context(Tool::Ellipse, FillMode::Filled);
        ctx.pointer_down(c(0.0, 0.0), true);
        ctx.pointer_move(c(8.0, 8.0));
        assert_eq!(ctx.styled_preview().unwrap().fill, Some(0xFF000000));
    }

    #[test]
    fn test_invalid_transition_rejected() {
        let mut ctx = context(Tool::Rectangle, FillMode::Filled);
        assert!(ctx.transition_to(EditorState::Idle).is_err());
    }

    #[test]
    #[should_panic(expected = "creates no shape")]
    fn test_finalize_with_eraser_panics() {
        let style = StyleConfiguration::default();
        finalize_shape(Tool::Eraser, ShapeKind::Rectangle, c(0.0, 0.0), c(1.0, 1.0), &style);
    }
}
