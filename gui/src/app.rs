#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::config::ListinoSettings;

use crate::components::{Filters, GeneralDiscounts, ProductList, SheetPicker, StatusBar, Toolbar};
use crate::config::GuiConfig;
use crate::state::AppState;

/// Root component: owns the session state and reopens the latest archived list.
#[component]
pub fn App() -> Element {
    let state = use_context_provider(|| {
        let settings = ListinoSettings::load_or_default(None).unwrap_or_else(|e| {
            tracing::error!("Failed to load settings: {}. Using defaults.", e);
            ListinoSettings::default()
        });
        let theme = GuiConfig::load_default().map(|cfg| cfg.theme).unwrap_or_default();
        let mut app_state = AppState::new(settings, theme);
        app_state.open_latest();
        Signal::new(app_state)
    });
    let palette = state.read().palette();
    let loaded = state.read().workbook.is_some();

    rsx! {
        div {
            style: "min-height: 100vh; padding: 16px; font-family: sans-serif; background-color: {palette.background}; color: {palette.foreground};",
            h1 { style: "color: {palette.primary};", "🧾 Listino Prezzi" }
            Toolbar {}
            StatusBar {}
            if loaded {
                SheetPicker {}
                Filters {}
                GeneralDiscounts {}
                ProductList {}
            }
        }
    }
}
