// Resolution of the price-list columns the engine knows about
use serde::{Deserialize, Serialize};
use shared::models::Table;

use crate::error::EngineError;

/// Header names of the fields of interest. Defaults match the Italian price lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub product: String,
    pub mesh: String,
    pub plate: String,
    pub dimension: String,
    pub weight_raw: String,
    pub weight_galvanized: String,
    pub raw_price: String,
    pub galvanized_price: String,
    pub discounts: [String; 3],
    pub discounted_raw_price: String,
    pub discounted_galvanized_price: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            product: "Prodotto".to_string(),
            mesh: "Maglia".to_string(),
            plate: "Piatto".to_string(),
            dimension: "Dimensione".to_string(),
            weight_raw: "Kg/Mq GR.".to_string(),
            weight_galvanized: "Kg/Mq ZN.".to_string(),
            raw_price: "Grezzo Mq".to_string(),
            galvanized_price: "Zincato Mq".to_string(),
            discounts: ["Sconto1".to_string(), "Sconto2".to_string(), "Sconto3".to_string()],
            discounted_raw_price: "Prezzo Scontato Mq Grezzo".to_string(),
            discounted_galvanized_price: "Prezzo Scontato Mq Zincato".to_string(),
        }
    }
}

impl ColumnNames {
    /// Columns treated as free text rather than numbers.
    pub fn text_columns(&self) -> [&str; 3] {
        [&self.product, &self.mesh, &self.plate]
    }

    /// (base price, computed discounted price) pairs.
    pub fn price_columns(&self) -> [(&str, &str); 2] {
        [
            (&self.raw_price, &self.discounted_raw_price),
            (&self.galvanized_price, &self.discounted_galvanized_price),
        ]
    }

    /// Fields shown for a product, in display order.
    pub fn detail_columns(&self) -> [&str; 8] {
        [
            &self.product,
            &self.mesh,
            &self.plate,
            &self.dimension,
            &self.weight_raw,
            &self.weight_galvanized,
            &self.raw_price,
            &self.galvanized_price,
        ]
    }
}

/// Column positions of one table; `None` means the feature is absent for that table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableSchema {
    pub product: Option<usize>,
    pub mesh: Option<usize>,
    pub plate: Option<usize>,
    pub dimension: Option<usize>,
    pub raw_price: Option<usize>,
    pub galvanized_price: Option<usize>,
    pub discounts: [Option<usize>; 3],
}

impl TableSchema {
    pub fn resolve(table: &Table, names: &ColumnNames) -> Self {
        TableSchema {
            product: table.column_index(&names.product),
            mesh: table.column_index(&names.mesh),
            plate: table.column_index(&names.plate),
            dimension: table.column_index(&names.dimension),
            raw_price: table.column_index(&names.raw_price),
            galvanized_price: table.column_index(&names.galvanized_price),
            discounts: [
                table.column_index(&names.discounts[0]),
                table.column_index(&names.discounts[1]),
                table.column_index(&names.discounts[2]),
            ],
        }
    }

    /// Row overrides need all three discount columns.
    pub fn discount_columns(&self) -> Option<[usize; 3]> {
        match self.discounts {
            [Some(a), Some(b), Some(c)] => Some([a, b, c]),
            _ => None,
        }
    }

    /// One `SchemaMismatch` per missing column, naming the feature it disables.
    pub fn mismatches(&self, names: &ColumnNames) -> Vec<EngineError> {
        let checks: [(Option<usize>, &str, &'static str); 8] = [
            (self.product, &names.product, "product search"),
            (self.mesh, &names.mesh, "mesh filter"),
            (self.plate, &names.plate, "plate filter"),
            (self.raw_price, &names.raw_price, "raw discounted price"),
            (self.galvanized_price, &names.galvanized_price, "galvanized discounted price"),
            (self.discounts[0], &names.discounts[0], "row discount overrides"),
            (self.discounts[1], &names.discounts[1], "row discount overrides"),
            (self.discounts[2], &names.discounts[2], "row discount overrides"),
        ];
        checks
            .iter()
            .filter(|(idx, _, _)| idx.is_none())
            .map(|(_, column, feature)| EngineError::SchemaMismatch {
                column: column.to_string(),
                feature,
            })
            .collect()
    }

    pub fn log_mismatches(&self, table: &Table, names: &ColumnNames) {
        for mismatch in self.mismatches(names) {
            tracing::warn!(sheet = %table.name, "{}", mismatch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Table {
        Table::new("Foglio1", names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_resolve_full_schema() {
        let names = ColumnNames::default();
        let table = columns(&[
            "Prodotto", "Maglia", "Piatto", "Dimensione", "Grezzo Mq", "Zincato Mq", "Sconto1", "Sconto2", "Sconto3",
        ]);
        let schema = TableSchema::resolve(&table, &names);
        assert_eq!(schema.product, Some(0));
        assert_eq!(schema.galvanized_price, Some(5));
        assert_eq!(schema.discount_columns(), Some([6, 7, 8]));
        assert!(schema.mismatches(&names).is_empty());
    }

    #[test]
    fn test_missing_plate_is_reported() {
        let names = ColumnNames::default();
        let table = columns(&["Prodotto", "Maglia", "Grezzo Mq", "Zincato Mq", "Sconto1", "Sconto2", "Sconto3"]);
        let schema = TableSchema::resolve(&table, &names);
        assert_eq!(schema.plate, None);

        let mismatches = schema.mismatches(&names);
        assert_eq!(mismatches.len(), 1);
        assert!(mismatches.iter().any(|m| m.to_string().contains("plate filter")));
    }

    #[test]
    fn test_partial_discount_columns_disable_overrides() {
        let names = ColumnNames::default();
        let table = columns(&["Prodotto", "Sconto1", "Sconto2"]);
        let schema = TableSchema::resolve(&table, &names);
        assert_eq!(schema.discount_columns(), None);
    }
}
