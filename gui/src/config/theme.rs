// Colours for the light and dark themes
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: String,
    pub foreground: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl ThemePalette {
    pub fn default_dark() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            foreground: "#d1d4dc".to_string(),
            primary: "#007acc".to_string(),
            secondary: "#2d2d2d".to_string(),
            accent: "#26a69a".to_string(),
            success: "#26a69a".to_string(),
            warning: "#f9a825".to_string(),
            error: "#ef5350".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            foreground: "#000000".to_string(),
            primary: "#007acc".to_string(),
            secondary: "#f0f2f6".to_string(),
            accent: "#009688".to_string(),
            success: "#2e7d32".to_string(),
            warning: "#e65100".to_string(),
            error: "#c62828".to_string(),
        }
    }
}
