//! The drawing session state machine.
//!
//! ```text
//!            pointer down (shape tool)
//!   ┌──────┐ ─────────────────────────► ┌──────────┐
//!   │ Idle │                            │ Dragging │ ◄─┐ pointer move
//!   └──────┘ ◄───────────────────────── └──────────┘ ──┘ (update preview)
//!            pointer up (finish or abandon)
//! ```
//!
//! The eraser never enters `Dragging`; it acts on pointer down.

use crate::shape::{Coordinate, ShapeDescriptor, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EditorState {
    /// No pointer held on the canvas
    #[default]
    Idle,
    /// Primary pointer held after pressing at `start`
    Dragging {
        kind: ShapeKind,
        start: Coordinate,
        /// Geometry of the shape so far; `None` until the pointer first moves
        preview: Option<ShapeDescriptor>,
    },
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        matches!(
            (self, new_state),
            (EditorState::Idle, EditorState::Dragging { .. })
                | (EditorState::Dragging { .. }, EditorState::Dragging { .. })
                | (EditorState::Dragging { .. }, EditorState::Idle)
        )
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, EditorState::Dragging { .. })
    }

    pub fn preview(&self) -> Option<&ShapeDescriptor> {
        match self {
            EditorState::Dragging { preview, .. } => preview.as_ref(),
            EditorState::Idle => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Dragging { .. } => "Dragging",
        }
    }
}
