//! XLSX (Excel) worksheet reading.
//!
//! A minimal cell-stream reader for Office Open XML spreadsheets: it loads
//! the shared-string table, parses one worksheet's `<sheetData>`, and
//! returns rows of resolved text. Formulas, styles and number formats are
//! not interpreted.
//!
//! # Example
//!
//! ```no_run
//! use rostersql::xlsx::{read, SheetSelector};
//!
//! let rows = read("members.xlsx", &SheetSelector::Name("Members".into()))?;
//! println!("{} rows", rows.len());
//! # Ok::<(), rostersql::Error>(())
//! ```

mod cell_ref;
mod reader;
mod shared_strings;
mod workbook;

pub use cell_ref::CellRef;
pub use reader::{
    parse_worksheet, read, read_bytes, read_package, SheetSelector, DEFAULT_SHEET_PART,
};
pub use shared_strings::SharedStrings;
pub use workbook::{worksheets, SheetEntry};
