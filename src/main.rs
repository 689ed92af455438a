mod app;
mod color;
mod data;
mod scale;
mod state;
mod ui;

use std::path::Path;

use app::HeatGridApp;
use eframe::egui;

/// Default dataset location, relative to the working directory.
const DEFAULT_DATA_PATH: &str = "data/global-temperature.json";

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([980.0, 560.0])
            .with_min_inner_size([980.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Heatgrid – Temperature Variance Viewer",
        options,
        Box::new(|_cc| {
            let mut heatgrid = HeatGridApp::default();
            let default_path = Path::new(DEFAULT_DATA_PATH);
            if default_path.exists() {
                heatgrid.state.load_path(default_path);
            }
            Ok(Box::new(heatgrid))
        }),
    )
}
