use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::italian_format;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Empty cells and whitespace-only text both count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    // Numbers pass through; text is tried as a plain float first ("12.5"),
    // then in Italian notation ("1.234,56"). A trailing '%' is ignored.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => {
                let trimmed = s.trim().trim_end_matches('%').trim();
                if trimmed.is_empty() {
                    return None;
                }
                f64::from_str(trimmed)
                    .ok()
                    .or_else(|| italian_format::parse_decimal(trimmed).ok())
                    .filter(|n| n.is_finite())
            }
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{:.0}", n),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// One product record. Cells are positional, aligned with the owning table's columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<CellValue>,
    /// Set when the user gave this row its own discounts, zeros included.
    /// Cleared only by an explicit reset.
    #[serde(default)]
    pub overridden: bool,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells, overridden: false }
    }

    pub fn get(&self, index: usize) -> &CellValue {
        self.cells.get(index).unwrap_or(&EMPTY_CELL)
    }

    pub fn set(&mut self, index: usize, value: CellValue) {
        if index >= self.cells.len() {
            self.cells.resize(index + 1, CellValue::Empty);
        }
        self.cells[index] = value;
    }
}

/// An ordered sequence of rows sharing one set of column headers, keyed by sheet name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r.get(col))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pushes a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(Row::new(cells));
    }

    /// Returns the index of `name`, appending the column (filled with `fill`) when absent.
    pub fn ensure_column(&mut self, name: &str, fill: CellValue) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        let idx = self.columns.len() - 1;
        for row in &mut self.rows {
            row.set(idx, fill.clone());
        }
        idx
    }
}

/// All sheets of a loaded spreadsheet, in file order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub tables: Vec<Table>,
}

impl Workbook {
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name.clone()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.name == name)
    }

    pub fn first(&self) -> Option<&Table> {
        self.tables.first()
    }

    /// Swaps in `table` for the sheet with the same name, or appends it.
    pub fn replace(&mut self, table: Table) {
        match self.sheet_mut(&table.name) {
            Some(existing) => *existing = table,
            None => self.tables.push(table),
        }
    }
}

/// Three discount percentages (sconto 1, 2, 3), nominally in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiscountSet {
    pub d1: f64,
    pub d2: f64,
    pub d3: f64,
}

impl DiscountSet {
    pub const ZERO: DiscountSet = DiscountSet { d1: 0.0, d2: 0.0, d3: 0.0 };

    pub fn new(d1: f64, d2: f64, d3: f64) -> Self {
        Self { d1, d2, d3 }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.d1, self.d2, self.d3]
    }

    pub fn total(&self) -> f64 {
        self.d1 + self.d2 + self.d3
    }

    pub fn is_zero(&self) -> bool {
        self.as_array().iter().all(|d| *d == 0.0)
    }

    /// Replaces one slot; `slot` is 1-based to match the Sconto1..3 headers.
    pub fn with_slot(mut self, slot: usize, value: f64) -> Self {
        match slot {
            1 => self.d1 = value,
            2 => self.d2 = value,
            3 => self.d3 = value,
            _ => {}
        }
        self
    }
}

impl fmt::Display for DiscountSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% / {}% / {}%", self.d1, self.d2, self.d3)
    }
}

// "10,5,0" -> (10, 5, 0). Missing trailing slots are zero.
impl FromStr for DiscountSet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() > 3 {
            return Err(anyhow::anyhow!("Expected at most 3 discounts, got {} in '{}'", parts.len(), s));
        }
        let mut values = [0.0; 3];
        for (slot, part) in parts.iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            values[slot] = part
                .parse::<f64>()
                .map_err(|e| anyhow::anyhow!("Invalid discount '{}': {}", part, e))?;
        }
        Ok(DiscountSet::new(values[0], values[1], values[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let mut table = Table::new("Listino", vec!["Prodotto".to_string(), "Grezzo Mq".to_string()]);
        table.push_row(vec![CellValue::text("Grigliato 30x2"), CellValue::Number(41.5)]);
        table.push_row(vec![CellValue::text("Grigliato 25x2")]);
        table
    }

    #[test]
    fn test_cell_as_number() {
        assert_eq!(CellValue::Number(12.5).as_number(), Some(12.5));
        assert_eq!(CellValue::text(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(CellValue::text("1.234,56").as_number(), Some(1234.56));
        assert_eq!(CellValue::text("10%").as_number(), Some(10.0));
        assert_eq!(CellValue::text("abc").as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_number(), None);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Number(30.0).to_string(), "30");
        assert_eq!(CellValue::Number(30.25).to_string(), "30.25");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Bool(false).to_string(), "FALSE");
    }

    #[test]
    fn test_push_row_pads_to_schema() {
        let table = sample_table();
        assert_eq!(table.rows[1].cells.len(), 2);
        assert_eq!(table.rows[1].get(1), &CellValue::Empty);
        assert_eq!(table.rows[1].get(7), &CellValue::Empty);
    }

    #[test]
    fn test_ensure_column_is_stable() {
        let mut table = sample_table();
        let idx = table.ensure_column("Sconto1", CellValue::Number(0.0));
        assert_eq!(idx, 2);
        assert_eq!(table.ensure_column("Sconto1", CellValue::Empty), 2);
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.cell(1, "Sconto1"), Some(&CellValue::Number(0.0)));
    }

    #[test]
    fn test_workbook_replace() {
        let mut workbook = Workbook::new(vec![sample_table()]);
        let mut updated = sample_table();
        updated.rows.pop();
        workbook.replace(updated);
        assert_eq!(workbook.tables.len(), 1);
        assert_eq!(workbook.sheet("Listino").map(Table::len), Some(1));

        workbook.replace(Table::new("Altro", vec![]));
        assert_eq!(workbook.sheet_names(), vec!["Listino".to_string(), "Altro".to_string()]);
    }

    #[test]
    fn test_discount_set_from_str() {
        assert_eq!("10,5,0".parse::<DiscountSet>().unwrap(), DiscountSet::new(10.0, 5.0, 0.0));
        assert_eq!("12.5".parse::<DiscountSet>().unwrap(), DiscountSet::new(12.5, 0.0, 0.0));
        assert!("1,2,3,4".parse::<DiscountSet>().is_err());
        assert!("dieci".parse::<DiscountSet>().is_err());
    }

    #[test]
    fn test_discount_set_slots() {
        let set = DiscountSet::ZERO.with_slot(2, 5.0).with_slot(9, 1.0);
        assert_eq!(set, DiscountSet::new(0.0, 5.0, 0.0));
        assert!(!set.is_zero());
        assert_eq!(set.total(), 5.0);
    }

    #[test]
    fn test_row_without_override_flag_deserializes() {
        let row: Row = serde_json::from_str(r#"{ "cells": [{ "Number": 1.0 }] }"#).unwrap();
        assert!(!row.overridden);
        assert_eq!(row.get(0), &CellValue::Number(1.0));
    }

    #[test]
    fn test_table_serde_round_trip() {
        let table = sample_table();
        let json = serde_json::to_string(&table).unwrap();
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
