//! Table types.

use super::document::{lenient_seq, StructuralElement};
use super::Paragraph;
use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    /// Declared number of rows
    pub rows: Option<u32>,

    /// Declared number of columns
    pub columns: Option<u32>,

    /// Rows in the table
    #[serde(deserialize_with = "lenient_seq")]
    pub table_rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows of cell text.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for row in rows {
            table.add_row(TableRow::from_strings(row));
        }
        table
    }

    /// Create a single-cell table holding the given paragraphs.
    pub fn single_cell(content: Vec<Paragraph>) -> Self {
        let mut table = Self::new();
        table.add_row(TableRow::new(vec![TableCell::with_content(content)]));
        table
    }

    /// Add a row to the table, keeping the declared size in step.
    pub fn add_row(&mut self, row: TableRow) {
        let width = row.table_cells.len() as u32;
        self.table_rows.push(row);
        self.rows = Some(self.table_rows.len() as u32);
        self.columns = Some(self.columns.unwrap_or(0).max(width));
    }

    /// Get the number of rows.
    ///
    /// The declared count wins over the materialized rows when present.
    pub fn row_count(&self) -> usize {
        self.rows
            .map(|rows| rows as usize)
            .unwrap_or(self.table_rows.len())
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.table_rows
            .first()
            .map(|r| r.table_cells.len())
            .unwrap_or(0)
    }

    /// Check if the table has exactly one row with exactly one cell.
    pub fn is_single_cell(&self) -> bool {
        self.table_rows.len() == 1 && self.column_count() == 1
    }

    /// The top-left cell.
    pub fn first_cell(&self) -> Option<&TableCell> {
        self.table_rows.first()?.table_cells.first()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table_rows.is_empty()
    }
}

/// A table row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableRow {
    /// Cells in the row
    #[serde(deserialize_with = "lenient_seq")]
    pub table_cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { table_cells: cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableCell {
    /// Cell content (nested structural elements)
    #[serde(deserialize_with = "lenient_seq")]
    pub content: Vec<StructuralElement>,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_content(vec![Paragraph::with_text(text)])
    }

    /// Create a cell with multiple paragraphs.
    pub fn with_content(content: Vec<Paragraph>) -> Self {
        Self {
            content: content
                .into_iter()
                .map(StructuralElement::paragraph)
                .collect(),
        }
    }

    /// Paragraphs of the cell, skipping nested tables.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().filter_map(|node| node.paragraph.as_ref())
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.paragraphs().map(Paragraph::plain_text).collect()
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }
}
