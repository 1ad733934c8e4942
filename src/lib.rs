//! # rostersql
//!
//! Read club roster workbooks (`.xlsx`) and turn them into SQL migrations.
//!
//! The core is a small cell-stream reader: it opens the zip package, loads
//! the shared-string table, parses one worksheet, and returns rows of
//! resolved text keyed by column label. The [`migrate`] module consumes
//! those rows to build `INSERT` statements for the `members` and
//! `office_bearers` tables.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rostersql::{read, SheetSelector};
//!
//! let rows = read("membership.xlsx", &SheetSelector::First)?;
//! for row in &rows {
//!     println!("{:?} {:?}", row.get("A"), row.get("B"));
//! }
//! # Ok::<(), rostersql::Error>(())
//! ```
//!
//! ## Building a migration
//!
//! ```no_run
//! use rostersql::migrate::{build_script_from_workbooks, MigrationOptions};
//!
//! let options = MigrationOptions::default().with_truncate(false);
//! let script = build_script_from_workbooks("membership.xlsx", "bearers.xlsx", &options)?;
//! println!("{}", script.to_sql());
//! # Ok::<(), rostersql::Error>(())
//! ```

pub mod container;
pub mod error;
pub mod migrate;
pub mod model;
pub mod xlsx;

#[cfg(test)]
mod test_utils;

// Re-exports
pub use container::Package;
pub use error::{Error, Result};
pub use model::{Cell, Row};
pub use xlsx::{read, read_bytes, SheetSelector};
