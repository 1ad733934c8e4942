//! Error types for the rostersql library.

use std::io;
use thiserror::Error;

/// Result type alias for rostersql operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a workbook or writing a migration.
///
/// The variants separate file problems (`PackageOpen`, `Io`) from format
/// problems (`MalformedDocument`, `SheetNotFound`) and data problems
/// (`CorruptSharedStringReference`).
#[derive(Error, Debug)]
pub enum Error {
    /// The package is missing, unreadable, or not a valid zip archive.
    #[error("Cannot open package {origin}: {source}")]
    PackageOpen {
        /// Path (or `<memory>`) the package was opened from
        origin: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// An XML part exists but is not well-formed.
    #[error("Malformed document part {part}: {message}")]
    MalformedDocument {
        /// Archive path of the offending part
        part: String,
        /// Parser or decoder description of the fault
        message: String,
    },

    /// The requested worksheet is not in the package.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// A shared-string cell points outside the shared-string table.
    #[error("Cell {reference} references shared string {index:?}, but the table holds {count} entries")]
    CorruptSharedStringReference {
        /// Cell reference, e.g. `B7`
        reference: String,
        /// Raw index text from the cell
        index: String,
        /// Number of entries in the shared-string table
        count: usize,
    },

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Build a `MalformedDocument` error for the given part.
    pub(crate) fn malformed(part: &str, message: impl ToString) -> Self {
        Error::MalformedDocument {
            part: part.to_string(),
            message: message.to_string(),
        }
    }
}
