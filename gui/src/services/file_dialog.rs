// Native open/save dialogs
use rfd::FileDialog;
use std::path::PathBuf;

pub fn pick_price_list() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Carica nuovo file Excel")
        .add_filter("Fogli di calcolo", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .pick_file()
}

pub fn pick_export_path(default_name: &str) -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Scarica Excel")
        .set_file_name(default_name)
        .add_filter("Excel", &["xlsx"])
        .save_file()
}
