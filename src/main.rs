mod app;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use app::DashboardApp;
use clap::Parser;
use config::Config;
use data::dashboard::Dashboard;
use data::model::LineSelection;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    log::debug!("Starting with {config:?}");

    // A dataset that cannot be loaded at startup is fatal.
    let mut state = AppState::new(config.month);
    if let Err(e) = state.load_path(&config.data) {
        log::error!("{e:#}");
        return Err(e);
    }

    if config.print {
        let selection = LineSelection::from_label(config.line.as_deref());
        let dataset = state.dataset.as_ref().ok_or_else(|| anyhow!("no dataset loaded"))?;
        let dashboard = Dashboard::compute(dataset, &selection, config.month);
        println!("{}", export::to_json(&dashboard)?);
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Super Store Dashboard",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(DashboardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
