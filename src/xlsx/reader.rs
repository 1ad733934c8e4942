//! Cell-stream reader: one worksheet into resolved rows.

use crate::container::Package;
use crate::error::{Error, Result};
use crate::model::{Cell, Row};
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

use super::cell_ref::CellRef;
use super::shared_strings::SharedStrings;
use super::workbook::worksheets;

/// Worksheet used when the workbook does not list any sheet.
pub const DEFAULT_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

const WORKSHEETS_DIR: &str = "xl/worksheets/";

/// Which worksheet to read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelector {
    /// The first sheet listed in the workbook; [`DEFAULT_SHEET_PART`] only
    /// when the workbook lists no sheets
    #[default]
    First,
    /// A worksheet part: a full archive path, or a file name under `xl/worksheets/`
    Part(String),
    /// The sheet with this display name
    Name(String),
}

impl SheetSelector {
    /// Resolve to an archive part path.
    ///
    /// `First` and `Name` fail with `SheetNotFound` when the chosen sheet
    /// has no relationship target; whether a `Part` exists is checked when
    /// it is read.
    pub fn resolve(&self, package: &Package) -> Result<String> {
        match self {
            SheetSelector::First => match worksheets(package)?.into_iter().next() {
                Some(sheet) => sheet.into_part(),
                None => Ok(DEFAULT_SHEET_PART.to_string()),
            },
            SheetSelector::Part(id) => Ok(if id.contains('/') {
                id.trim_start_matches('/').to_string()
            } else {
                format!("{}{}", WORKSHEETS_DIR, id)
            }),
            SheetSelector::Name(name) => worksheets(package)?
                .into_iter()
                .find(|sheet| &sheet.name == name)
                .ok_or_else(|| Error::SheetNotFound(name.clone()))?
                .into_part(),
        }
    }
}

impl From<&str> for SheetSelector {
    fn from(part: &str) -> Self {
        SheetSelector::Part(part.to_string())
    }
}

/// Read one worksheet of the package at `path`.
///
/// # Example
///
/// ```no_run
/// use rostersql::{read, SheetSelector};
///
/// let rows = read("members.xlsx", &SheetSelector::First)?;
/// for row in &rows {
///     println!("{:?}", row.get("A"));
/// }
/// # Ok::<(), rostersql::Error>(())
/// ```
pub fn read(path: impl AsRef<Path>, sheet: &SheetSelector) -> Result<Vec<Row>> {
    let package = Package::open(path)?;
    read_package(&package, sheet)
}

/// Read one worksheet of an in-memory package.
pub fn read_bytes(data: Vec<u8>, sheet: &SheetSelector) -> Result<Vec<Row>> {
    let package = Package::from_bytes(data)?;
    read_package(&package, sheet)
}

/// Read one worksheet of an opened package.
pub fn read_package(package: &Package, sheet: &SheetSelector) -> Result<Vec<Row>> {
    let shared_strings = SharedStrings::load(package)?;
    let part = sheet.resolve(package)?;
    let xml = package
        .read_xml(&part)?
        .ok_or_else(|| Error::SheetNotFound(part.clone()))?;

    let rows = parse_worksheet(&part, &xml, &shared_strings)?;
    tracing::debug!(
        package = package.origin(),
        part = %part,
        rows = rows.len(),
        "read worksheet"
    );
    Ok(rows)
}

/// A `<c>` element whose end has not been seen yet.
struct PendingCell {
    depth: usize,
    reference: Option<String>,
    cell_type: Option<String>,
    value: Option<String>,
}

impl PendingCell {
    fn from_element(part: &str, e: &BytesStart<'_>, depth: usize) -> Result<Self> {
        Ok(Self {
            depth,
            reference: attribute(part, e, b"r")?,
            cell_type: attribute(part, e, b"t")?,
            value: None,
        })
    }

    /// Resolve and store the cell, or skip it if its reference is malformed.
    fn finish(self, row: &mut Row, shared_strings: &SharedStrings) -> Result<()> {
        let Some(reference) = self.reference else {
            tracing::debug!("skipping cell without reference");
            return Ok(());
        };
        let Some(CellRef { column, row: number }) = CellRef::parse(&reference) else {
            tracing::debug!(reference = %reference, "skipping cell with malformed reference");
            return Ok(());
        };

        let raw = self.value.filter(|v| !v.is_empty());
        let value = match (self.cell_type.as_deref(), raw) {
            (Some("s"), Some(index)) => Some(shared_strings.resolve(&reference, &index)?),
            (_, raw) => raw,
        };

        row.insert(Cell::new(column, number, value));
        Ok(())
    }
}

/// Parse worksheet XML into rows.
///
/// Rows come out in document order, including rows without cells. Only
/// `t="s"` values are decoded; every other value is returned as raw text.
pub fn parse_worksheet(part: &str, xml: &str, shared_strings: &SharedStrings) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);

    let mut depth = 0usize;
    let mut in_sheet_data = false;
    let mut current_row: Option<Row> = None;
    let mut cell: Option<PendingCell> = None;
    let mut in_value = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                match e.local_name().as_ref() {
                    b"sheetData" => in_sheet_data = true,
                    b"row" if in_sheet_data && current_row.is_none() => {
                        current_row = Some(Row::new(row_number(part, &e)?));
                    }
                    b"c" if current_row.is_some() && cell.is_none() => {
                        cell = Some(PendingCell::from_element(part, &e, depth)?);
                    }
                    b"v" => {
                        if let Some(pending) = cell.as_mut() {
                            if depth == pending.depth + 1 {
                                in_value = true;
                                pending.value = Some(String::new());
                            }
                        }
                    }
                    _ => {}
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"row" if in_sheet_data && current_row.is_none() => {
                    rows.push(Row::new(row_number(part, &e)?));
                }
                b"c" => {
                    if let (Some(row), None) = (current_row.as_mut(), cell.as_ref()) {
                        PendingCell::from_element(part, &e, depth)?
                            .finish(row, shared_strings)?;
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_value {
                    if let Some(pending) = cell.as_mut() {
                        let text = e.unescape().map_err(|e| Error::malformed(part, e))?;
                        pending.value.get_or_insert_with(String::new).push_str(&text);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_value {
                    if let Some(pending) = cell.as_mut() {
                        let text = String::from_utf8_lossy(&e);
                        pending.value.get_or_insert_with(String::new).push_str(&text);
                    }
                }
            }
            Ok(Event::End(e)) => {
                depth = depth.saturating_sub(1);
                match e.local_name().as_ref() {
                    b"v" => in_value = false,
                    b"c" if cell.as_ref().is_some_and(|pending| pending.depth == depth) => {
                        if let (Some(pending), Some(row)) = (cell.take(), current_row.as_mut()) {
                            pending.finish(row, shared_strings)?;
                        }
                    }
                    b"row" => {
                        if cell.is_none() {
                            if let Some(row) = current_row.take() {
                                rows.push(row);
                            }
                        }
                    }
                    b"sheetData" => in_sheet_data = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => {
                if depth != 0 {
                    return Err(Error::malformed(part, "unexpected end of document"));
                }
                break;
            }
            Err(e) => return Err(Error::malformed(part, e)),
            _ => {}
        }
    }

    Ok(rows)
}

/// Read an unprefixed attribute value.
fn attribute(part: &str, e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::malformed(part, err))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|err| Error::malformed(part, err))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// The declared `r` index of a row; informational, so unparseable is `None`.
fn row_number(part: &str, e: &BytesStart<'_>) -> Result<Option<u64>> {
    Ok(attribute(part, e, b"r")?.and_then(|r| r.trim().parse().ok()))
}
