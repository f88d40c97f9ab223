#![warn(clippy::all, rust_2018_idioms)]

use eframe_shapes::ShapesApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("untitled - Shapes")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Shapes",
        native_options,
        Box::new(|cc| Ok(Box::new(ShapesApp::new(cc)))),
    )
}
