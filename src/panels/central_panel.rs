use crate::ShapesApp;
use crate::input::{InputEvent, route_event};

pub fn central_panel(app: &mut ShapesApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::central_panel(&ctx.style()).fill(egui::Color32::from_gray(200)))
        .show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let size = app.document().size().to_vec2();
                let (canvas_rect, response) =
                    ui.allocate_exact_size(size, egui::Sense::click_and_drag());

                let (input, editor, renderer) = app.canvas_parts();

                // Presses only start something when the canvas itself is under the pointer
                let hovered = response.hovered();
                let mut repaint = false;
                for event in input.process_input(ctx, canvas_rect) {
                    if matches!(event, InputEvent::PointerDown { .. }) && !hovered {
                        continue;
                    }
                    repaint |= route_event(&event, editor).needs_repaint();
                }
                if repaint {
                    ctx.request_repaint();
                }

                renderer.render(ui.painter(), canvas_rect, editor);
            });
        });
}
