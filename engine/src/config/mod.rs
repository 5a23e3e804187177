pub mod settings;

pub use settings::ListinoSettings;
