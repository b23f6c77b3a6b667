// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! labelscope - camera/LiDAR ground-truth review tool
//!
//! A desktop viewer that steps through synchronized camera images and
//! point clouds and overlays their 2D and 3D annotations for inspection.

mod app;
mod config;
mod error;
mod io;
mod models;
mod render;
mod ui;
mod util;

use anyhow::Result;
use app::ViewerApp;
use config::ViewerConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = ViewerConfig::discover()?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Viewer with groundtruth label"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "labelscope",
        options,
        Box::new(move |_cc| Ok(Box::new(ViewerApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
