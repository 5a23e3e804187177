// `listino` command line entry point
use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::config::ListinoSettings;
use engine::data::{self, archive::PriceListArchive};
use engine::discount::{recompute_table, DiscountRule};
use engine::error::EngineError;
use engine::table::{filter_rows, filtered_table, RowFilter};
use shared::models::{CellValue, DiscountSet, Table};
use shared::utils::italian_format;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "listino", version, about = "Price list viewer: discounts, filters and export")]
struct Cli {
    /// JSON settings file (defaults to $LISTINO_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the sheets of a price list
    Sheets { file: Option<PathBuf> },
    /// Print the discounted, filtered rows
    Show {
        #[command(flatten)]
        view: ViewArgs,
        /// Rows to print (defaults to preview_rows from the settings)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Write the discounted, filtered table to .xlsx or .csv
    Export {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Copy a price list into the dated archive
    Archive { file: PathBuf },
    /// Print the archived price list opened when no file is given
    Latest,
}

#[derive(Args)]
struct ViewArgs {
    /// Price list to open; the latest archived one when omitted
    file: Option<PathBuf>,
    #[arg(long)]
    sheet: Option<String>,
    /// Case-insensitive product search
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    mesh: Option<String>,
    #[arg(long)]
    plate: Option<String>,
    /// General discounts as d1,d2,d3
    #[arg(long, default_value = "0,0,0")]
    discount: DiscountSet,
    #[arg(long, value_enum)]
    rule: Option<RuleArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum RuleArg {
    Additive,
    Compounding,
}

impl From<RuleArg> for DiscountRule {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::Additive => DiscountRule::Additive,
            RuleArg::Compounding => DiscountRule::Compounding,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut settings = ListinoSettings::load_or_default(cli.config.as_deref())?;
    let archive = PriceListArchive::new(settings.archive_dir.clone());

    match cli.command {
        Command::Sheets { file } => {
            let source = resolve_source(file, &archive)?;
            let workbook = data::load_workbook(&source, &settings)?;
            for name in workbook.sheet_names() {
                println!("{}", name);
            }
        }
        Command::Show { view, limit } => {
            if let Some(rule) = view.rule {
                settings.discount_rule = rule.into();
            }
            let table = open_sheet(&view, &archive, &settings)?;
            let updated = recompute_table(&table, &view.discount, settings.discount_rule, &settings.columns);
            let filter = row_filter(&view, &settings);
            let limit = limit.unwrap_or(settings.preview_rows);

            for (_, row) in filter_rows(&updated, &filter).take(limit) {
                println!("{}", summary_line(&updated, row, &settings));
            }
        }
        Command::Export { view, output } => {
            if let Some(rule) = view.rule {
                settings.discount_rule = rule.into();
            }
            let table = open_sheet(&view, &archive, &settings)?;
            let updated = recompute_table(&table, &view.discount, settings.discount_rule, &settings.columns);
            let exported = filtered_table(&updated, &row_filter(&view, &settings));
            let output = output.unwrap_or_else(|| PathBuf::from(&settings.export_file_name));

            data::save_table(&exported, &output, &settings)
                .with_context(|| format!("Failed to export to '{}'", output.display()))?;
            println!("{} rows written to {}", exported.len(), output.display());
        }
        Command::Archive { file } => {
            let stored = archive.store_file(&file)?;
            println!("File saved as: {}", stored.display());
        }
        Command::Latest => match archive.latest()? {
            Some(path) => println!("{}", path.display()),
            None => println!("No saved price list found in {}", archive.dir().display()),
        },
    }

    Ok(())
}

fn resolve_source(file: Option<PathBuf>, archive: &PriceListArchive) -> Result<PathBuf, EngineError> {
    match file {
        Some(path) => Ok(path),
        None => {
            let latest = archive.require_latest()?;
            info!(path = %latest.display(), "Opening latest archived price list");
            Ok(latest)
        }
    }
}

fn open_sheet(view: &ViewArgs, archive: &PriceListArchive, settings: &ListinoSettings) -> Result<Table, EngineError> {
    let source = resolve_source(view.file.clone(), archive)?;
    let mut workbook = data::load_workbook(&source, settings)?;
    let position = match &view.sheet {
        Some(name) => workbook
            .tables
            .iter()
            .position(|t| t.name == *name)
            .ok_or_else(|| EngineError::SheetNotFound(name.clone()))?,
        None => 0,
    };
    if position >= workbook.tables.len() {
        return Err(EngineError::SheetNotFound("<first sheet>".to_string()));
    }
    Ok(workbook.tables.swap_remove(position))
}

fn row_filter(view: &ViewArgs, settings: &ListinoSettings) -> RowFilter {
    let names = &settings.columns;
    RowFilter::for_columns(names)
        .query(view.search.clone())
        .category(names.mesh.clone(), view.mesh.clone().unwrap_or_default())
        .category(names.plate.clone(), view.plate.clone().unwrap_or_default())
}

// "Grigliato | Maglia: 33x11 | ... | Prezzo Scontato Mq Grezzo: 37,35"
fn summary_line(table: &Table, row: &shared::models::Row, settings: &ListinoSettings) -> String {
    let names = &settings.columns;
    let computed = [names.discounted_raw_price.as_str(), names.discounted_galvanized_price.as_str()];
    let mut parts = Vec::new();
    for column in names.detail_columns().into_iter().chain(computed) {
        let Some(idx) = table.column_index(column) else {
            continue;
        };
        let value = match row.get(idx) {
            CellValue::Number(n) if computed.contains(&column) => italian_format::format_decimal(*n, 2),
            CellValue::Empty if computed.contains(&column) => "-".to_string(),
            cell => cell.to_string(),
        };
        if column == names.product {
            parts.push(value);
        } else {
            parts.push(format!("{}: {}", column, value));
        }
    }
    parts.join(" | ")
}
