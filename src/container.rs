//! ZIP package abstraction for spreadsheet workbooks.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Component, Path};
use zip::result::ZipError;

/// Label used as the package origin when reading from memory.
const MEMORY_ORIGIN: &str = "<memory>";

/// Read-only view of a zipped spreadsheet package.
///
/// The archive lives only as long as this value; dropping it releases the
/// underlying buffer. Parts are read through `&self`, so the handle is
/// neither `Sync` nor meant to be shared across threads.
pub struct Package {
    origin: String,
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl Package {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rostersql::container::Package;
    ///
    /// let package = Package::open("members.xlsx")?;
    /// assert!(package.exists("xl/workbook.xml"));
    /// # Ok::<(), rostersql::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let origin = path.as_ref().display().to_string();
        let data = File::open(path.as_ref())
            .and_then(|file| {
                let mut reader = BufReader::new(file);
                let mut data = Vec::new();
                reader.read_to_end(&mut data)?;
                Ok(data)
            })
            .map_err(|e| Error::PackageOpen {
                origin: origin.clone(),
                source: ZipError::Io(e),
            })?;
        Self::with_origin(data, origin)
    }

    /// Open a package held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::with_origin(data, MEMORY_ORIGIN.to_string())
    }

    fn with_origin(data: Vec<u8>, origin: String) -> Result<Self> {
        match zip::ZipArchive::new(Cursor::new(data)) {
            Ok(archive) => Ok(Self {
                origin,
                archive: RefCell::new(archive),
            }),
            Err(source) => Err(Error::PackageOpen { origin, source }),
        }
    }

    /// Where the package was opened from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Read an XML part as a string, or `None` if the part is absent.
    ///
    /// Handles UTF-8 (with or without BOM) and UTF-16 LE/BE with a BOM.
    pub fn read_xml(&self, part: &str) -> Result<Option<String>> {
        let bytes = {
            let mut archive = self.archive.borrow_mut();
            let mut file = match archive.by_name(part) {
                Ok(file) => file,
                Err(ZipError::FileNotFound) => return Ok(None),
                Err(source) => return Err(self.open_error(source)),
            };
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)
                .map_err(|e| self.open_error(ZipError::Io(e)))?;
            bytes
        };

        tracing::debug!(package = %self.origin, part, size = bytes.len(), "read part");
        decode_xml_bytes(part, &bytes).map(Some)
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, part: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == part);
        found
    }

    /// List parts whose path starts with `prefix`, sorted.
    pub fn list_parts_with_prefix(&self, prefix: &str) -> Vec<String> {
        let archive = self.archive.borrow();
        let mut parts: Vec<String> = archive
            .file_names()
            .filter(|n| n.starts_with(prefix))
            .map(String::from)
            .collect();
        parts.sort();
        parts
    }

    /// Resolve a relationship target against the part that declares it.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(stripped) = relative.strip_prefix('/') {
            return stripped.to_string();
        }

        let base_dir = Path::new(base).parent().unwrap_or(Path::new(""));

        let mut result = base_dir.to_path_buf();
        for component in Path::new(relative).components() {
            match component {
                Component::ParentDir => {
                    result.pop();
                }
                Component::Normal(c) => {
                    result.push(c);
                }
                _ => {}
            }
        }

        result.to_string_lossy().replace('\\', "/")
    }

    fn open_error(&self, source: ZipError) -> Error {
        Error::PackageOpen {
            origin: self.origin.clone(),
            source,
        }
    }
}

impl std::fmt::Debug for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Package")
            .field("origin", &self.origin)
            .field("parts", &self.archive.borrow().len())
            .finish()
    }
}

/// Decode XML bytes, handling UTF-8 and BOM-marked UTF-16.
pub fn decode_xml_bytes(part: &str, bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(rest.to_vec()).map_err(|e| Error::malformed(part, e));
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let content = decode_utf16(part, rest, u16::from_le_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let content = decode_utf16(part, rest, u16::from_be_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    String::from_utf8(bytes.to_vec()).map_err(|e| Error::malformed(part, e))
}

fn decode_utf16(part: &str, bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::malformed(part, "UTF-16 content has an odd number of bytes"));
    }
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::malformed(part, e))
}

/// Once UTF-16 is decoded the declaration must stop claiming UTF-16,
/// otherwise quick-xml re-interprets the UTF-8 text.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let (decl, rest) = content.split_at(end_decl + 2);
            let fixed = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");
            return format!("{}{}", fixed, rest);
        }
    }
    content.to_string()
}
