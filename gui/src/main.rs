// GUI main entry point using Dioxus
#![allow(non_snake_case)] // Common for Dioxus components

use dioxus::prelude::*;
use dioxus_desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};

mod app;
mod components;
mod config;
mod services;
mod state;

use app::App;
use config::GuiConfig;

fn main() {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting Listino GUI (Dioxus Desktop)...");

    let gui_config = match GuiConfig::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load default configuration: {}. Using built-in defaults.", e);
            GuiConfig::default()
        }
    };

    let desktop_config = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(gui_config.title.clone())
            .with_inner_size(LogicalSize::new(gui_config.width, gui_config.height)),
    );

    LaunchBuilder::desktop().with_cfg(desktop_config).launch(App);

    tracing::info!("Listino GUI finished.");
}
