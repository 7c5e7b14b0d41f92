//! Tabletop scene: a wooden table on a floor with a wicker box that rises
//! above it and then orbits. Arrow up/down change the orbit radius; Escape exits.

mod animation;
mod app;
mod camera;
mod config;
mod controls;
mod scene;

use anyhow::Result;
use tabletop_engine::device::GpuInit;
use tabletop_engine::logging::{init_logging, LoggingConfig};
use tabletop_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::app::TabletopApp;
use crate::config::SceneConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = SceneConfig::from_env();
    log::info!("assets directory: {}", config.assets_dir.display());

    let runtime = RuntimeConfig {
        title:        config.title.clone(),
        initial_size: LogicalSize::new(config.window_size.0, config.window_size.1),
    };

    Runtime::run(runtime, GpuInit::default(), TabletopApp::new(config))
}
