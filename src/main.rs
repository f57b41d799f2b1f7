mod config;
mod controller;
mod error;
mod ops;
mod renderer;
mod types;
mod ui;

use std::time::Duration;

use eframe::egui;

use crate::config::PlayerConfig;
use crate::renderer::gst_engine::GstEngine;
use crate::ui::app::PlayerApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("egui", log::LevelFilter::Warn)
        .filter_module("eframe", log::LevelFilter::Warn)
        .init();

    let config = PlayerConfig::load();
    let title = config.window_title.clone();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([config.window_size.0, config.window_size.1]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| {
            let engine = GstEngine::new(Duration::from_secs(config.discover_timeout_secs))?;
            Ok(Box::new(PlayerApp::new(cc, engine, &config)))
        }),
    )
}
