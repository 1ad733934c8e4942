//! A1-style cell reference decomposition.

use regex::Regex;
use std::sync::LazyLock;

static CELL_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)([0-9]+)").expect("cell reference pattern is valid"));

/// A cell reference split into column label and row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    /// Column label, e.g. `"B"` or `"XFD"`
    pub column: String,
    /// One-based row number
    pub row: u64,
}

impl CellRef {
    /// Split a reference such as `"B7"` or `"AA120"`.
    ///
    /// Returns `None` when the reference does not start with capital letters
    /// followed by digits, or when the row number does not fit in a `u64`.
    pub fn parse(reference: &str) -> Option<Self> {
        let caps = CELL_REFERENCE.captures(reference)?;
        let row = caps[2].parse().ok()?;
        Some(Self {
            column: caps[1].to_string(),
            row,
        })
    }
}
