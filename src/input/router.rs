use egui::PointerButton;

use crate::state::{EditorContext, PointerOutcome};

use super::InputEvent;

/// Routes a canvas event to the drawing session.
pub fn route_event(event: &InputEvent, ctx: &mut EditorContext) -> PointerOutcome {
    match *event {
        InputEvent::PointerDown { position, button } => {
            ctx.pointer_down(position, button == PointerButton::Primary)
        }
        InputEvent::PointerMove { position } => ctx.pointer_move(position),
        InputEvent::PointerUp { position, button } => {
            ctx.pointer_up(position, button == PointerButton::Primary)
        }
    }
}
