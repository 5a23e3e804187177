// Session state for the price-list viewer.
// Components read it through a `Signal<AppState>` provided at the root and
// call the methods below; every discount change recomputes the cached view.

use engine::config::ListinoSettings;
use engine::data::archive::PriceListArchive;
use engine::data::{self, xlsx_writer};
use engine::discount::reconcile::effective_discounts;
use engine::models::TableSchema;
use engine::table::{self, distinct_values, filter_rows, filtered_table, RowFilter};
use engine::{recompute_table, EngineError};
use serde::{Deserialize, Serialize};
use shared::models::{CellValue, DiscountSet, Table, Workbook};
use shared::utils::italian_format;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::theme::ThemePalette;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

/// Feedback line shown under the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Success(String),
    Warning(String),
    Error(String),
}

/// One line of the product list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductItem {
    pub index: usize,
    pub product: String,
    pub summary: String,
}

/// Everything the detail panel shows for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDetail {
    pub title: String,
    pub fields: Vec<(String, String)>,
    pub discounts: DiscountSet,
    pub has_override: bool,
    pub raw_price: String,
    pub galvanized_price: String,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: ListinoSettings,
    pub current_theme: Theme,
    pub workbook: Option<Workbook>,
    pub source: Option<PathBuf>,
    pub sheet: Option<String>,
    /// Current sheet with the discounted price columns filled in.
    pub view: Option<Table>,
    pub query: String,
    pub mesh: String,
    pub plate: String,
    pub general: DiscountSet,
    pub open_detail: Option<usize>,
    pub status: Option<Status>,
}

impl AppState {
    pub fn new(settings: ListinoSettings, theme: Theme) -> Self {
        Self {
            settings,
            current_theme: theme,
            workbook: None,
            source: None,
            sheet: None,
            view: None,
            query: String::new(),
            mesh: String::new(),
            plate: String::new(),
            general: DiscountSet::ZERO,
            open_detail: None,
            status: None,
        }
    }

    pub fn palette(&self) -> ThemePalette {
        match self.current_theme {
            Theme::Dark => ThemePalette::default_dark(),
            Theme::Light => ThemePalette::default_light(),
        }
    }

    pub fn toggle_theme(&mut self) {
        self.current_theme = match self.current_theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
    }

    fn archive(&self) -> PriceListArchive {
        PriceListArchive::new(&self.settings.archive_dir)
    }

    /// Copies `path` into the archive, then opens the archived copy.
    pub fn load_file(&mut self, path: &Path) {
        let stored = match self.archive().store_file(path) {
            Ok(stored) => stored,
            Err(e) => return self.fail("Impossibile salvare il file", e),
        };
        match data::load_workbook(&stored, &self.settings) {
            Ok(workbook) => {
                self.set_workbook(workbook, stored.clone());
                self.status = Some(Status::Success(format!("✅ File salvato come: {}", stored.display())));
            }
            Err(e) => self.fail("Impossibile leggere il file", e),
        }
    }

    /// Opens the newest archived price list, warning when the archive is empty.
    pub fn open_latest(&mut self) {
        let latest = match self.archive().latest() {
            Ok(Some(path)) => path,
            Ok(None) => {
                self.status = Some(Status::Warning("⚠️ Nessun file salvato trovato.".to_string()));
                return;
            }
            Err(e) => return self.fail("Archivio non leggibile", e),
        };
        match data::load_workbook(&latest, &self.settings) {
            Ok(workbook) => {
                self.set_workbook(workbook, latest.clone());
                self.status = Some(Status::Success(format!("📂 Aperto: {}", latest.display())));
            }
            Err(e) => self.fail("Impossibile leggere il file", e),
        }
    }

    /// Replaces the session's workbook and resets filters and the open detail.
    pub fn set_workbook(&mut self, workbook: Workbook, source: PathBuf) {
        tracing::info!(path = %source.display(), sheets = workbook.tables.len(), "Opened price list");
        self.sheet = workbook.first().map(|t| t.name.clone());
        self.workbook = Some(workbook);
        self.source = Some(source);
        self.clear_filters();
        self.open_detail = None;
        self.refresh();
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.as_ref().map(Workbook::sheet_names).unwrap_or_default()
    }

    pub fn select_sheet(&mut self, name: &str) {
        let exists = self.workbook.as_ref().is_some_and(|wb| wb.sheet(name).is_some());
        if !exists {
            self.status = Some(Status::Error(EngineError::SheetNotFound(name.to_string()).to_string()));
            return;
        }
        self.sheet = Some(name.to_string());
        self.clear_filters();
        self.open_detail = None;
        self.refresh();
    }

    pub fn current_table(&self) -> Option<&Table> {
        let name = self.sheet.as_deref()?;
        self.workbook.as_ref()?.sheet(name)
    }

    fn current_table_mut(&mut self) -> Option<&mut Table> {
        let name = self.sheet.as_deref()?;
        self.workbook.as_mut()?.sheet_mut(name)
    }

    /// Recomputes the discounted view of the current sheet.
    pub fn refresh(&mut self) {
        let names = &self.settings.columns;
        self.view = self
            .current_table()
            .map(|table| recompute_table(table, &self.general, self.settings.discount_rule, names));
    }

    fn clear_filters(&mut self) {
        self.query.clear();
        self.mesh.clear();
        self.plate.clear();
    }

    pub fn row_filter(&self) -> RowFilter {
        let names = &self.settings.columns;
        RowFilter::for_columns(names)
            .query(self.query.clone())
            .category(names.mesh.clone(), self.mesh.clone())
            .category(names.plate.clone(), self.plate.clone())
    }

    /// Choices for a category picker; `None` hides the picker.
    pub fn category_options(&self, column: &str) -> Option<Vec<String>> {
        let table = self.current_table()?;
        table.has_column(column).then(|| distinct_values(table, column))
    }

    pub fn matching_count(&self) -> usize {
        self.view
            .as_ref()
            .map(|view| filter_rows(view, &self.row_filter()).count())
            .unwrap_or(0)
    }

    /// The first `preview_rows` matching rows, keyed by their index in the sheet.
    pub fn preview_items(&self) -> Vec<ProductItem> {
        let Some(view) = self.view.as_ref() else {
            return Vec::new();
        };
        let names = &self.settings.columns;
        let summary_columns = [
            &names.mesh,
            &names.plate,
            &names.dimension,
            &names.raw_price,
            &names.galvanized_price,
        ];
        filter_rows(view, &self.row_filter())
            .take(self.settings.preview_rows)
            .map(|(index, _)| ProductItem {
                index,
                product: text_of(view, index, &names.product),
                summary: summary_columns
                    .iter()
                    .filter(|column| view.has_column(column))
                    .map(|column| format!("{}: {}", column, text_of(view, index, column)))
                    .collect::<Vec<_>>()
                    .join(" | "),
            })
            .collect()
    }

    pub fn set_general_slot(&mut self, slot: usize, value: f64) {
        self.general = self.general.with_slot(slot, value);
        self.refresh();
    }

    /// Opens the detail of `index`, or closes it when it is already open.
    pub fn toggle_detail(&mut self, index: usize) {
        self.open_detail = if self.open_detail == Some(index) { None } else { Some(index) };
    }

    pub fn detail(&self, index: usize) -> Option<RowDetail> {
        let view = self.view.as_ref()?;
        let row = view.rows.get(index)?;
        let names = &self.settings.columns;
        let schema = TableSchema::resolve(view, names);
        let fields = names
            .detail_columns()
            .iter()
            .filter(|column| view.has_column(column))
            .map(|column| (column.to_string(), text_of(view, index, column)))
            .collect();
        Some(RowDetail {
            title: text_of(view, index, &names.product),
            fields,
            discounts: effective_discounts(row, &schema, &self.general),
            has_override: table::row_discounts(view, index, names).is_some(),
            raw_price: price_of(view, index, &names.discounted_raw_price),
            galvanized_price: price_of(view, index, &names.discounted_galvanized_price),
        })
    }

    /// Edits one slot of the row's discounts, starting from the ones it uses now.
    pub fn set_row_discount_slot(&mut self, index: usize, slot: usize, value: f64) {
        let Some(current) = self.detail(index).map(|d| d.discounts) else {
            return;
        };
        let updated = current.with_slot(slot, value);
        let names = self.settings.columns.clone();
        let result = match self.current_table_mut() {
            Some(sheet) => table::set_row_discounts(sheet, index, updated, &names),
            None => return,
        };
        match result {
            Ok(()) => self.refresh(),
            Err(e) => self.fail("Sconto non applicato", e),
        }
    }

    pub fn reset_row_discounts(&mut self, index: usize) {
        let names = self.settings.columns.clone();
        let result = match self.current_table_mut() {
            Some(sheet) => table::reset_row_discounts(sheet, index, &names),
            None => return,
        };
        match result {
            Ok(()) => self.refresh(),
            Err(e) => self.fail("Ripristino non riuscito", e),
        }
    }

    pub fn append_blank_row(&mut self) {
        let Some(extended) = self
            .current_table()
            .map(|sheet| table::append_blank_row(sheet, &self.settings.columns))
        else {
            return;
        };
        if let Some(workbook) = self.workbook.as_mut() {
            workbook.replace(extended);
        }
        self.refresh();
    }

    /// The filtered view as an `.xlsx` file.
    pub fn export_bytes(&self) -> Result<Vec<u8>, EngineError> {
        let view = self
            .view
            .as_ref()
            .ok_or_else(|| EngineError::ConfigError("Nessun listino aperto".to_string()))?;
        let filtered = filtered_table(view, &self.row_filter());
        xlsx_writer::table_to_buffer(&filtered, &self.settings.columns)
    }

    pub fn export_to(&mut self, path: &Path) {
        let result = self
            .export_bytes()
            .and_then(|bytes| fs::write(path, bytes).map_err(EngineError::from));
        match result {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Exported updated price list");
                self.status = Some(Status::Success(format!("📥 Esportato: {}", path.display())));
            }
            Err(e) => self.fail("Esportazione non riuscita", e),
        }
    }

    fn fail(&mut self, context: &str, error: EngineError) {
        tracing::error!("{}: {}", context, error);
        self.status = Some(Status::Error(format!("❌ {}: {}", context, error)));
    }
}

/// Reads a discount typed by the user; blank means 0, garbage is ignored.
pub fn parse_percent(input: &str) -> Option<f64> {
    if input.trim().is_empty() {
        return Some(0.0);
    }
    CellValue::text(input).as_number()
}

fn text_of(table: &Table, index: usize, column: &str) -> String {
    table.cell(index, column).map(ToString::to_string).unwrap_or_default()
}

fn price_of(table: &Table, index: usize, column: &str) -> String {
    table
        .cell(index, column)
        .and_then(CellValue::as_number)
        .map(italian_format::format_price)
        .unwrap_or_else(|| "n/d".to_string())
}
