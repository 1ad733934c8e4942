//! XLSX shared strings parsing.

use crate::container::Package;
use crate::error::{Error, Result};
use quick_xml::events::Event;

/// Archive path of the shared-string part.
pub(crate) const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Shared strings table.
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    /// All strings in order
    strings: Vec<String>,
}

/// Text collected for one `<si>` record.
#[derive(Default)]
struct Record {
    /// Depth of the `<si>` element
    depth: usize,
    /// Text of the first `<t>` that is a direct child of `<si>`
    direct: Option<String>,
    /// Text of every nested `<t>` (rich-text runs, phonetic runs)
    runs: String,
}

impl Record {
    fn finish(self) -> String {
        self.direct.unwrap_or(self.runs)
    }
}

impl SharedStrings {
    /// Load the table from a package; an absent part yields an empty table.
    pub fn load(package: &Package) -> Result<Self> {
        match package.read_xml(SHARED_STRINGS_PART)? {
            Some(xml) => Self::parse(&xml),
            None => {
                tracing::debug!(package = package.origin(), "no shared strings part");
                Ok(Self::default())
            }
        }
    }

    /// Parse shared strings from XML content.
    ///
    /// A record with a direct `<t>` child takes that node's text. Otherwise
    /// the text of all nested `<t>` nodes is concatenated in document order.
    /// A record with neither is the empty string.
    pub fn parse(xml: &str) -> Result<Self> {
        let part = SHARED_STRINGS_PART;
        let mut strings = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);

        let mut depth = 0usize;
        let mut record: Option<Record> = None;
        // Some(is_direct) while inside a <t> of the current record
        let mut text_node: Option<bool> = None;
        let mut text = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    match e.local_name().as_ref() {
                        b"si" if record.is_none() => {
                            record = Some(Record {
                                depth,
                                ..Default::default()
                            });
                        }
                        b"t" => {
                            if let Some(rec) = &record {
                                text_node = Some(depth == rec.depth + 1);
                                text.clear();
                            }
                        }
                        _ => {}
                    }
                    depth += 1;
                }
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"si" if record.is_none() => strings.push(String::new()),
                    b"t" => {
                        if let Some(rec) = record.as_mut() {
                            if depth == rec.depth + 1 && rec.direct.is_none() {
                                rec.direct = Some(String::new());
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if text_node.is_some() {
                        let unescaped = e.unescape().map_err(|e| Error::malformed(part, e))?;
                        text.push_str(&unescaped);
                    }
                }
                Ok(Event::CData(e)) => {
                    if text_node.is_some() {
                        text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::End(e)) => {
                    depth = depth.saturating_sub(1);
                    match e.local_name().as_ref() {
                        b"t" => {
                            let node = (text_node.take(), record.as_mut());
                            if let (Some(is_direct), Some(rec)) = node {
                                let value = std::mem::take(&mut text);
                                if !is_direct {
                                    rec.runs.push_str(&value);
                                } else if rec.direct.is_none() {
                                    rec.direct = Some(value);
                                }
                            }
                        }
                        b"si" if record.as_ref().is_some_and(|rec| rec.depth == depth) => {
                            if let Some(rec) = record.take() {
                                strings.push(rec.finish());
                            }
                        }
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

        tracing::debug!(count = strings.len(), "parsed shared strings");
        Ok(Self { strings })
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Resolve the raw `<v>` text of a shared-string cell.
    ///
    /// A non-numeric or out-of-range index is a data error, never an empty
    /// string.
    pub fn resolve(&self, reference: &str, index: &str) -> Result<String> {
        index
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|idx| self.get(idx))
            .map(str::to_string)
            .ok_or_else(|| Error::CorruptSharedStringReference {
                reference: reference.to_string(),
                index: index.to_string(),
                count: self.len(),
            })
    }

    /// Get the count of shared strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
