mod app;
mod color;
mod config;
mod data;
mod geo;
mod state;
mod ui;

use app::WorkforceApp;
use clap::Parser;
use config::{AppConfig, Cli};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Industrial Human Resource Management",
        options,
        Box::new(move |_cc| Ok(Box::new(WorkforceApp::new(&config)))),
    )
}
