// Search and categorical filters over table rows
use shared::models::{Row, Table};
use std::collections::BTreeSet;

use crate::error::EngineError;
use crate::models::schema::ColumnNames;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryFilter {
    pub column: String,
    pub value: String,
}

/// Case-insensitive text search plus exact-match category filters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowFilter {
    pub query: String,
    pub search_columns: Vec<String>,
    pub categories: Vec<CategoryFilter>,
}

impl RowFilter {
    /// Searches the product column; no categories.
    pub fn for_columns(names: &ColumnNames) -> Self {
        RowFilter {
            query: String::new(),
            search_columns: vec![names.product.clone()],
            categories: Vec::new(),
        }
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn search_in(mut self, column: impl Into<String>) -> Self {
        self.search_columns.push(column.into());
        self
    }

    /// An empty `value` means "any" and adds nothing.
    pub fn category(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.categories.push(CategoryFilter { column: column.into(), value });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.categories.is_empty()
    }

    fn compile(&self, table: &Table) -> RowMatcher {
        let needle = self.query.trim().to_lowercase();
        let search: Vec<usize> = self
            .search_columns
            .iter()
            .filter_map(|column| table.column_index(column))
            .collect();
        if !needle.is_empty() && search.is_empty() {
            let columns = self.search_columns.join(", ");
            tracing::warn!(sheet = %table.name, "{}", EngineError::SchemaMismatch { column: columns, feature: "text search" });
        }

        let categories = self
            .categories
            .iter()
            .filter_map(|c| match table.column_index(&c.column) {
                Some(idx) => Some((idx, c.value.clone())),
                None => {
                    tracing::warn!(sheet = %table.name, "{}", EngineError::SchemaMismatch { column: c.column.clone(), feature: "category filter" });
                    None
                }
            })
            .collect();

        RowMatcher { needle, search, categories }
    }
}

#[derive(Debug, Clone)]
struct RowMatcher {
    needle: String,
    search: Vec<usize>,
    categories: Vec<(usize, String)>,
}

impl RowMatcher {
    fn matches(&self, row: &Row) -> bool {
        let text_ok = self.needle.is_empty()
            || self.search.is_empty()
            || self
                .search
                .iter()
                .any(|idx| row.get(*idx).to_string().to_lowercase().contains(&self.needle));

        text_ok
            && self
                .categories
                .iter()
                .all(|(idx, value)| row.get(*idx).to_string() == *value)
    }
}

/// Lazily yields `(original index, row)` for matching rows, in table order.
///
/// The iterator is `Clone`, so a view can be walked again without re-filtering setup.
/// Columns named by the filter but absent from the table are ignored.
pub fn filter_rows<'a>(table: &'a Table, filter: &RowFilter) -> impl Iterator<Item = (usize, &'a Row)> + Clone + 'a {
    let matcher = filter.compile(table);
    table
        .rows
        .iter()
        .enumerate()
        .filter(move |(_, row)| matcher.matches(row))
}

/// The filtered view as a standalone table with the same schema.
pub fn filtered_table(table: &Table, filter: &RowFilter) -> Table {
    let mut result = Table::new(table.name.clone(), table.columns.clone());
    result.rows = filter_rows(table, filter).map(|(_, row)| row.clone()).collect();
    result
}

/// Sorted unique non-empty values of a column; empty when the column is absent.
pub fn distinct_values(table: &Table, column: &str) -> Vec<String> {
    let Some(idx) = table.column_index(column) else {
        return Vec::new();
    };
    table
        .rows
        .iter()
        .map(|row| row.get(idx).to_string())
        .filter(|value| !value.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CellValue;

    fn grigliati() -> Table {
        let mut table = Table::new(
            "Grigliati",
            vec!["Prodotto".to_string(), "Maglia".to_string(), "Piatto".to_string()],
        );
        for (product, mesh, plate) in [
            ("Grigliato Elettrosaldato", "33x11", "25x2"),
            ("Grigliato Pressato", "33x33", "30x3"),
            ("Gradino ELETTROSALDATO", "33x11", "30x3"),
            ("Lamiera stirata", "", "25x2"),
        ] {
            table.push_row(vec![CellValue::text(product), CellValue::text(mesh), CellValue::text(plate)]);
        }
        table
    }

    fn products<'a>(rows: impl Iterator<Item = (usize, &'a Row)>) -> Vec<usize> {
        rows.map(|(idx, _)| idx).collect()
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let table = grigliati();
        let filter = RowFilter::for_columns(&ColumnNames::default());
        assert!(filter.is_empty());
        assert_eq!(products(filter_rows(&table, &filter)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let table = grigliati();
        let filter = RowFilter::for_columns(&ColumnNames::default()).query("elettro");
        assert_eq!(products(filter_rows(&table, &filter)), vec![0, 2]);
    }

    #[test]
    fn test_category_exact_match() {
        let table = grigliati();
        let filter = RowFilter::for_columns(&ColumnNames::default())
            .category("Maglia", "33x11")
            .category("Piatto", "30x3");
        assert_eq!(products(filter_rows(&table, &filter)), vec![2]);

        // exact, not substring
        let partial = RowFilter::for_columns(&ColumnNames::default()).category("Maglia", "33");
        assert!(products(filter_rows(&table, &partial)).is_empty());
    }

    #[test]
    fn test_empty_category_value_is_ignored() {
        let filter = RowFilter::for_columns(&ColumnNames::default()).category("Maglia", "");
        assert!(filter.categories.is_empty());
    }

    #[test]
    fn test_missing_category_column_is_skipped() {
        let mut table = grigliati();
        table.columns.truncate(2);
        for row in &mut table.rows {
            row.cells.truncate(2);
        }
        let filter = RowFilter::for_columns(&ColumnNames::default())
            .query("grigliato")
            .category("Piatto", "30x3");
        assert_eq!(products(filter_rows(&table, &filter)), vec![0, 1]);
    }

    #[test]
    fn test_extra_search_columns() {
        let table = grigliati();
        let filter = RowFilter::for_columns(&ColumnNames::default()).search_in("Piatto").query("25X2");
        assert_eq!(products(filter_rows(&table, &filter)), vec![0, 3]);
    }

    #[test]
    fn test_view_is_restartable_and_lazy() {
        let table = grigliati();
        let filter = RowFilter::for_columns(&ColumnNames::default()).query("grigliato");
        let view = filter_rows(&table, &filter);
        let again = view.clone();
        assert_eq!(products(view), products(again));
        assert_eq!(products(filter_rows(&table, &filter).take(1)), vec![0]);
    }

    #[test]
    fn test_filtered_table_keeps_schema() {
        let table = grigliati();
        let filter = RowFilter::for_columns(&ColumnNames::default()).category("Piatto", "25x2");
        let view = filtered_table(&table, &filter);
        assert_eq!(view.columns, table.columns);
        assert_eq!(view.len(), 2);
        assert_eq!(view.rows[1], table.rows[3]);
    }

    #[test]
    fn test_distinct_values_sorted_without_blanks() {
        let table = grigliati();
        assert_eq!(distinct_values(&table, "Maglia"), vec!["33x11".to_string(), "33x33".to_string()]);
        assert!(distinct_values(&table, "Colore").is_empty());
    }
}
