// GUI configuration module
pub mod theme; // Light/dark colour palettes

use serde::Deserialize;

use crate::state::Theme;

/// Window and look settings, embedded from `assets/config/default.json`.
/// Engine behaviour (columns, archive, discount rule) comes from `ListinoSettings`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GuiConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub theme: Theme,
}

impl Default for GuiConfig {
    fn default() -> Self {
        GuiConfig {
            title: "Listino Prezzi".to_string(),
            width: 1280.0,
            height: 800.0,
            theme: Theme::Light,
        }
    }
}

impl GuiConfig {
    pub fn load_default() -> Result<Self, anyhow::Error> {
        let config_str = include_str!("../../assets/config/default.json"); // Path relative to this .rs file
        Self::from_json(config_str)
    }

    pub fn from_json(raw: &str) -> Result<Self, anyhow::Error> {
        let config: GuiConfig = serde_json::from_str(raw)?;
        if config.width <= 0.0 || config.height <= 0.0 {
            anyhow::bail!("Window size must be positive, got {}x{}", config.width, config.height);
        }
        Ok(config)
    }
}
