use std::path::{Path, PathBuf};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use fetch_sim::{config::DEFAULT_CONFIG_FILE, load_settings, FetchPipeline};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::QuoteGridApp;

const APP_NAME: &str = "Random Quote Fetcher";

#[derive(Debug, Parser)]
#[command(name = "quote-grid", about = "Keyboard-driven grid of randomly fetched quotes")]
struct Args {
    /// TOML settings file; defaults to ./quote_grid.toml, then the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for reproducible pages, delays, and quotes.
    #[arg(long)]
    seed: Option<u64>,
}

/// The working-directory file wins; `load_settings` reads it on its own.
fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return None;
        }
        dirs::config_dir()
            .map(|dir| dir.join("quote_grid").join(DEFAULT_CONFIG_FILE))
            .filter(|path| path.exists())
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config_path = resolve_config_path(args.config);
    let mut settings =
        load_settings(config_path.as_deref()).context("failed to load quote grid settings")?;
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    tracing::info!(
        config = ?config_path,
        seed = ?settings.seed,
        stage_delay_min_ms = settings.stage_delay_min_ms,
        stage_delay_max_ms = settings.stage_delay_max_ms,
        "starting desktop grid"
    );

    let pipeline = FetchPipeline::new(settings);
    let store = pipeline.store();

    // Select-all queues one launch per cell in a single frame.
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1024);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(4096);
    backend_bridge::runtime::launch(pipeline, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([980.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |_cc| Ok(Box::new(QuoteGridApp::new(store, cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop ui exited with error: {err}"))
}
