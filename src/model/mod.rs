//! Row model produced by the cell-stream reader.
//!
//! Consumers see only these structures: resolved text keyed by column
//! label, grouped into rows in worksheet order. Nothing about the archive,
//! the XML, or shared-string indices leaks through.

mod row;

pub use row::*;
