#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod helpers;
mod launcher;
mod modules;
mod theme;
mod widgets;

use chironium_core::location::Location;

fn main() -> eframe::Result {
    // Optional deep link: `chironium /project/Suivi_Migration_Automne/derush/16`
    // opens straight into the named module. A malformed route falls back to
    // the launcher instead of refusing to start.
    let deep_link = std::env::args().nth(1).and_then(|arg| match Location::parse(&arg) {
        Ok(location) => Some(location),
        Err(e) => {
            chironium_log!("ignoring bad deep link {arg:?}: {e}");
            None
        }
    });

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("🦇 Chironium")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([960.0, 640.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Chironium",
        native_options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app::ChironiumApp::new(cc, deep_link)))
        }),
    )
}
