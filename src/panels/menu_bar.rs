use crate::ShapesApp;

use super::PathPurpose;

pub fn menu_bar(app: &mut ShapesApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New...").clicked() {
                    app.show_new_document_dialog();
                    ui.close_menu();
                }
                if ui.button("Open...").clicked() {
                    app.show_path_prompt(PathPurpose::Open);
                    ui.close_menu();
                }
                if ui.button("Save").clicked() {
                    app.save_or_prompt();
                    ui.close_menu();
                }
                if ui.button("Save As...").clicked() {
                    app.show_path_prompt(PathPurpose::SaveAs);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Export Image...").clicked() {
                    app.show_path_prompt(PathPurpose::Export);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                let has_layers = !app.document().is_empty();
                if ui.add_enabled(has_layers, egui::Button::new("Clear")).clicked() {
                    log::info!("Clearing {} layers", app.document().len());
                    app.clear();
                    ui.close_menu();
                }
            });

            ui.menu_button("Settings", |ui| {
                let autosave = app.autosave_settings_mut();
                ui.checkbox(&mut autosave.enabled, "Autosave");
                ui.add_enabled(
                    autosave.enabled,
                    egui::Slider::new(&mut autosave.interval_secs, 10..=3600)
                        .text("Interval (s)"),
                );
                ui.add_enabled(
                    autosave.enabled,
                    egui::Slider::new(&mut autosave.max_files, 1..=50).text("Files kept"),
                );
            });
        });
    });
}
