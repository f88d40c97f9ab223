use egui::{Context, PointerButton, Pos2, Rect};

use crate::shape::Coordinate;

mod router;
pub use router::route_event;

const BUTTONS: [PointerButton; 3] = [
    PointerButton::Primary,
    PointerButton::Secondary,
    PointerButton::Middle,
];

/// Pointer input in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed over the canvas
    PointerDown {
        position: Coordinate,
        button: PointerButton,
    },
    /// Mouse button was released, anywhere in the window
    PointerUp {
        position: Coordinate,
        button: PointerButton,
    },
    /// Mouse moved
    PointerMove { position: Coordinate },
}

/// Handles converting raw egui input into canvas events
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen position to canvas-local coordinate
    pub fn to_canvas(pos: Pos2, canvas_rect: Rect) -> Coordinate {
        Coordinate::from(pos - canvas_rect.min.to_vec2())
    }

    /// Collect this frame's pointer events for the canvas occupying `canvas_rect`.
    ///
    /// Presses only count inside the canvas. Moves and releases are reported wherever the
    /// pointer is, so a drag that leaves the canvas still ends.
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let previous = self.last_pointer_pos;
            let current = input.pointer.latest_pos();

            if let Some(pos) = current {
                if Some(pos) != previous {
                    events.push(InputEvent::PointerMove {
                        position: Self::to_canvas(pos, canvas_rect),
                    });
                }
            }

            // Releases after the pointer left the window land at the last known position
            let Some(pos) = current.or(previous) else {
                return;
            };
            self.last_pointer_pos = Some(pos);
            let position = Self::to_canvas(pos, canvas_rect);

            for button in BUTTONS {
                if input.pointer.button_pressed(button) && canvas_rect.contains(pos) {
                    events.push(InputEvent::PointerDown { position, button });
                }
                if input.pointer.button_released(button) {
                    events.push(InputEvent::PointerUp { position, button });
                }
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_canvas_is_relative_to_rect() {
        let rect = Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(300.0, 200.0));
        assert_eq!(
            InputHandler::to_canvas(egui::pos2(110.0, 75.0), rect),
            Coordinate::new(10.0, 25.0)
        );
    }

    #[test]
    fn test_no_events_without_pointer() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(10.0, 10.0));
        let _ = ctx.run(Default::default(), |ctx| {
            assert!(handler.process_input(ctx, rect).is_empty());
        });
    }
}
