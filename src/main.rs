mod app;
mod color;
mod state;
mod ui;

use app::MolScoutApp;
use eframe::egui;
use molscout::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        log::error!("Ignoring invalid configuration: {e:#}");
        AppConfig::default()
    });
    log::info!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "MolScout – AI Drug Discovery Demo",
        options,
        Box::new(|_cc| Ok(Box::new(MolScoutApp::new(config)))),
    )
}
