// Engine settings, loaded from a JSON file or defaulted
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::discount::DiscountRule;
use crate::error::{EngineError, Result};
use crate::models::schema::ColumnNames;

/// Environment variable naming the JSON settings file.
pub const CONFIG_ENV: &str = "LISTINO_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ListinoSettings {
    /// Folder where loaded price lists are copied, one file per day.
    pub archive_dir: PathBuf,
    pub preview_rows: usize,
    pub discount_rule: DiscountRule,
    pub export_file_name: String,
    pub csv_delimiter: char,
    pub columns: ColumnNames,
}

impl Default for ListinoSettings {
    fn default() -> Self {
        ListinoSettings {
            archive_dir: PathBuf::from("listini_salvati"),
            preview_rows: 50,
            discount_rule: DiscountRule::default(),
            export_file_name: "listino_aggiornato.xlsx".to_string(),
            csv_delimiter: ';',
            columns: ColumnNames::default(),
        }
    }
}

impl ListinoSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let settings: ListinoSettings = serde_json::from_str(&raw).map_err(|e| {
            EngineError::ConfigError(format!("Invalid settings in '{}': {}", path.display(), e))
        })?;
        settings.validate()?;
        tracing::info!(path = %path.display(), rule = ?settings.discount_rule, "Loaded settings");
        Ok(settings)
    }

    /// Explicit path first, then `LISTINO_CONFIG`, then defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(env_path) => Self::load(Path::new(&env_path)),
            None => Ok(Self::default()),
        }
    }

    pub fn csv_delimiter_byte(&self) -> u8 {
        // validate() guarantees an ASCII delimiter
        self.csv_delimiter as u8
    }

    fn validate(&self) -> Result<()> {
        if self.preview_rows == 0 {
            return Err(EngineError::ConfigError("preview_rows must be greater than 0".to_string()));
        }
        if !self.csv_delimiter.is_ascii() {
            return Err(EngineError::ConfigError(format!(
                "csv_delimiter must be an ASCII character, got '{}'",
                self.csv_delimiter
            )));
        }
        Ok(())
    }
}
