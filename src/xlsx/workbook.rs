//! Worksheet directory from `xl/workbook.xml` and its relationships.

use crate::container::Package;
use crate::error::{Error, Result};
use quick_xml::events::Event;
use std::collections::HashMap;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";

/// A worksheet listed in the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    /// Display name, e.g. `"Members"`
    pub name: String,
    /// Archive path of the worksheet part; `None` when the sheet's
    /// relationship has no target
    pub part: Option<String>,
}

impl SheetEntry {
    /// The worksheet part, or `SheetNotFound` naming this sheet.
    pub fn into_part(self) -> Result<String> {
        match self.part {
            Some(part) => Ok(part),
            None => Err(Error::SheetNotFound(self.name)),
        }
    }
}

/// List worksheets in workbook order.
///
/// Every listed sheet is returned, including sheets whose relationship
/// cannot be resolved. A package without a workbook part has no listed
/// sheets.
pub fn worksheets(package: &Package) -> Result<Vec<SheetEntry>> {
    let Some(xml) = package.read_xml(WORKBOOK_PART)? else {
        return Ok(Vec::new());
    };
    let targets = match package.read_xml(WORKBOOK_RELS_PART)? {
        Some(rels) => parse_relationships(&rels)?,
        None => HashMap::new(),
    };

    let sheets = parse_sheets(&xml)?
        .into_iter()
        .map(|(name, rel_id)| {
            let part = targets
                .get(&rel_id)
                .map(|target| Package::resolve_path(WORKBOOK_PART, target));
            if part.is_none() {
                tracing::debug!(
                    sheet = %name,
                    rel_id = %rel_id,
                    "sheet has no relationship target"
                );
            }
            SheetEntry { name, part }
        })
        .collect();

    Ok(sheets)
}

/// Parse `(name, relationship id)` pairs from workbook.xml.
fn parse_sheets(xml: &str) -> Result<Vec<(String, String)>> {
    let mut sheets = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"sheet" {
                    let mut name = String::new();
                    let mut rel_id = String::new();

                    for attr in e.attributes() {
                        let attr = attr.map_err(|e| Error::malformed(WORKBOOK_PART, e))?;
                        let value = attr
                            .unescape_value()
                            .map_err(|e| Error::malformed(WORKBOOK_PART, e))?;
                        match attr.key.as_ref() {
                            b"name" => name = value.into_owned(),
                            key if key.ends_with(b":id") => rel_id = value.into_owned(),
                            _ => {}
                        }
                    }

                    if !name.is_empty() {
                        sheets.push((name, rel_id));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::malformed(WORKBOOK_PART, e)),
            _ => {}
        }
    }

    Ok(sheets)
}

/// Parse relationship id -> target from workbook.xml.rels.
fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut rels = HashMap::new();
    let mut reader = quick_xml::Reader::from_str(xml);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let mut id = String::new();
                    let mut target = String::new();

                    for attr in e.attributes() {
                        let attr = attr.map_err(|e| Error::malformed(WORKBOOK_RELS_PART, e))?;
                        match attr.key.as_ref() {
                            b"Id" => id = String::from_utf8_lossy(&attr.value).into_owned(),
                            b"Target" => target = String::from_utf8_lossy(&attr.value).into_owned(),
                            _ => {}
                        }
                    }

                    if !id.is_empty() && !target.is_empty() {
                        rels.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::malformed(WORKBOOK_RELS_PART, e)),
            _ => {}
        }
    }

    Ok(rels)
}
