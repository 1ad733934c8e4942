//! Row and cell structures.

use serde::{Deserialize, Serialize};

/// A resolved worksheet cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Column label, e.g. `"B"` or `"AA"`
    pub column: String,

    /// Row number taken from the cell reference
    pub row: u64,

    /// Resolved text; `None` when the cell has no value node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Cell {
    /// Create a cell.
    pub fn new(column: impl Into<String>, row: u64, value: Option<String>) -> Self {
        Self {
            column: column.into(),
            row,
            value,
        }
    }

    /// The reference this cell was read from, e.g. `"B7"`.
    pub fn reference(&self) -> String {
        format!("{}{}", self.column, self.row)
    }
}

/// A worksheet row: cells keyed by column label.
///
/// Inserting a cell whose column is already present replaces the earlier
/// one. Cells keep insertion order, which is not a promise of column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Row index declared by the worksheet (`r` attribute), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,

    /// Cells in this row
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create an empty row with an optional declared index.
    pub fn new(number: Option<u64>) -> Self {
        Self {
            number,
            cells: Vec::new(),
        }
    }

    /// Store a cell under its column label.
    pub fn insert(&mut self, cell: Cell) {
        match self.cells.iter_mut().find(|c| c.column == cell.column) {
            Some(existing) => *existing = cell,
            None => self.cells.push(cell),
        }
    }

    /// Get the cell for a column label.
    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.column == column)
    }

    /// Get the value for a column label.
    ///
    /// Returns `None` both when the column is missing and when the cell
    /// has no value; use [`Row::cell`] to tell those apart.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cell(column).and_then(|c| c.value.as_deref())
    }

    /// Check whether a column label is present.
    pub fn contains(&self, column: &str) -> bool {
        self.cell(column).is_some()
    }

    /// Column labels present in this row.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|c| c.column.as_str())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
