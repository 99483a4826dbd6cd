#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod error;
mod io;
mod model;
mod ui;

use log::info;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("egui", log::LevelFilter::Info)
        .filter_module("eframe", log::LevelFilter::Info)
        .format_timestamp_millis()
        .init();

    info!("Planning Gantt {} starting", env!("CARGO_PKG_VERSION"));
    match io::PlannerSettings::default_path() {
        Ok(path) => info!("Settings file: {}", path.display()),
        Err(e) => info!("{}", e),
    }
    let settings = io::PlannerSettings::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Planning"),
        ..Default::default()
    };

    eframe::run_native(
        "Planning Gantt",
        options,
        Box::new(|cc| Ok(Box::new(app::PlannerApp::new(cc, settings)))),
    )
}
