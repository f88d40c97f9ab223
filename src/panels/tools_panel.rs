use crate::ShapesApp;
use crate::style::{FillMode, Tool, argb_from_color, color_from_argb};

pub const MAX_BRUSH_WIDTH: u32 = 50;

pub fn tools_panel(app: &mut ShapesApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            let editor = app.editor_mut();
            let style = *editor.style();

            ui.heading("Tools");
            for tool in Tool::ALL {
                if ui.selectable_label(style.tool == tool, tool.label()).clicked() {
                    log::info!("Tool selected from UI: {}", tool.label());
                    editor.set_tool(tool);
                }
            }
            ui.separator();

            ui.heading("Fill");
            for fill_mode in FillMode::ALL {
                if ui
                    .radio(style.fill_mode == fill_mode, fill_mode.label())
                    .clicked()
                {
                    editor.set_fill_mode(fill_mode);
                }
            }
            ui.separator();

            ui.heading("Colors");
            egui::Grid::new("colors_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Primary");
                    let mut primary = color_from_argb(style.primary_color);
                    if ui.color_edit_button_srgba(&mut primary).changed() {
                        editor.set_primary_color(argb_from_color(primary));
                    }
                    ui.end_row();

                    ui.label("Secondary");
                    let mut secondary = color_from_argb(style.secondary_color);
                    if ui.color_edit_button_srgba(&mut secondary).changed() {
                        editor.set_secondary_color(argb_from_color(secondary));
                    }
                    ui.end_row();
                });
            ui.separator();

            let mut width = style.brush_width;
            if ui
                .add(egui::Slider::new(&mut width, 0..=MAX_BRUSH_WIDTH).text("Brush width"))
                .changed()
            {
                editor.set_brush_width(width);
            }

            ui.separator();
            ui.label(format!("Layers: {}", editor.document().len()));
            ui.label(format!("State: {}", editor.state().name()));
        });
}
