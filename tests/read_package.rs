//! End-to-end reads of synthetic workbook packages written to disk.
//!
//! Run with: cargo test --test read_package

use rostersql::{read, read_bytes, Error, SheetSelector};
use std::io::{Cursor, Write};
use std::path::PathBuf;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
</Types>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

/// Creates an xlsx package from a worksheet body and optional shared strings.
fn create_xlsx(rows: &str, shared_strings: Option<&str>) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>{}</sheetData>
</worksheet>"#,
        rows
    );

    let mut parts = vec![
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("xl/workbook.xml", WORKBOOK.to_string()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", sheet),
    ];
    if let Some(records) = shared_strings {
        parts.push((
            "xl/sharedStrings.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">{}</sst>"#,
                records
            ),
        ));
    }

    for (path, content) in parts {
        zip.start_file(path, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    buffer.into_inner()
}

fn write_xlsx(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, data).unwrap();
    path
}

#[test]
fn test_literal_rows_round_trip() {
    let rows_xml: String = (1..=5)
        .map(|i| {
            format!(
                r#"<row r="{i}"><c r="A{i}"><v>{}</v></c><c r="B{i}" t="str"><v>name {i}</v></c></row>"#,
                i * 10
            )
        })
        .collect();
    let dir = TempDir::new().unwrap();
    let path = write_xlsx(&dir, "plain.xlsx", &create_xlsx(&rows_xml, None));

    let rows = read(&path, &SheetSelector::First).unwrap();
    assert_eq!(rows.len(), 5);
    for (i, row) in rows.iter().enumerate() {
        let n = i as u64 + 1;
        assert_eq!(row.number, Some(n));
        assert_eq!(row.get("A"), Some((n * 10).to_string().as_str()));
        assert_eq!(row.get("B"), Some(format!("name {n}").as_str()));
    }
}

#[test]
fn test_shared_string_resolution() {
    let data = create_xlsx(
        r#"<row r="1"><c r="A1" t="s"><v>1</v></c><c r="B1" t="s"><v>2</v></c></row>"#,
        Some("<si><t>Alice</t></si><si><t>Bob</t></si><si><r><t>Foo</t></r><r><t>Bar</t></r></si>"),
    );
    let rows = read_bytes(data, &SheetSelector::First).unwrap();
    assert_eq!(rows[0].get("A"), Some("Bob"));
    assert_eq!(rows[0].get("B"), Some("FooBar"));
}

#[test]
fn test_missing_shared_strings_part() {
    let data = create_xlsx(
        r#"<row r="1"><c r="A1" t="n"><v>3.5</v></c><c r="B1" t="inlineStr"><is><t>x</t></is></c></row>"#,
        None,
    );
    let rows = read_bytes(data, &SheetSelector::First).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("A"), Some("3.5"));
}

#[test]
fn test_sheet_not_found() {
    let data = create_xlsx(r#"<row r="1"><c r="A1"><v>1</v></c></row>"#, None);

    let err = read_bytes(data.clone(), &SheetSelector::from("sheet7.xml")).unwrap_err();
    assert!(matches!(err, Error::SheetNotFound(ref part) if part == "xl/worksheets/sheet7.xml"));

    let err = read_bytes(data, &SheetSelector::Name("Officers".to_string())).unwrap_err();
    assert!(matches!(err, Error::SheetNotFound(_)));
}

#[test]
fn test_out_of_range_shared_string() {
    let data = create_xlsx(
        r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>99</v></c></row>"#,
        Some("<si><t>Alice</t></si><si><t>Bob</t></si>"),
    );
    let err = read_bytes(data, &SheetSelector::First).unwrap_err();
    match err {
        Error::CorruptSharedStringReference {
            reference,
            index,
            count,
        } => {
            assert_eq!(reference, "B1");
            assert_eq!(index, "99");
            assert_eq!(count, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_blank_row_preserved() {
    let data = create_xlsx(
        r#"<row r="1"><c r="A1"><v>1</v></c></row><row r="2"></row><row r="3"><c r="A3"><v>3</v></c></row>"#,
        None,
    );
    let rows = read_bytes(data, &SheetSelector::First).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].is_empty());
    assert_eq!(rows[2].get("A"), Some("3"));
}

#[test]
fn test_malformed_reference_tolerated() {
    let data = create_xlsx(
        r#"<row r="1"><c r="!!1"><v>bad</v></c><c r="B1"><v>good</v></c></row>"#,
        None,
    );
    let rows = read_bytes(data, &SheetSelector::First).unwrap();
    assert_eq!(rows[0].len(), 1);
    assert_eq!(rows[0].get("B"), Some("good"));
}

#[test]
fn test_missing_file_is_package_error() {
    let dir = TempDir::new().unwrap();
    let err = read(dir.path().join("absent.xlsx"), &SheetSelector::First).unwrap_err();
    assert!(matches!(err, Error::PackageOpen { .. }));
}

#[test]
fn test_non_zip_file_is_package_error() {
    let dir = TempDir::new().unwrap();
    let path = write_xlsx(&dir, "fake.xlsx", b"Full Name,Rotary ID\nJane,1\n");
    let err = read(&path, &SheetSelector::First).unwrap_err();
    assert!(matches!(err, Error::PackageOpen { .. }));
}

#[test]
fn test_malformed_worksheet_names_part() {
    let data = create_xlsx(r#"<row r="1"><c r="A1"><v>1</c></row>"#, None);
    let err = read_bytes(data, &SheetSelector::First).unwrap_err();
    match err {
        Error::MalformedDocument { part, .. } => assert_eq!(part, "xl/worksheets/sheet1.xml"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_reads_are_independent_across_threads() {
    let data = create_xlsx(
        r#"<row r="1"><c r="A1" t="s"><v>0</v></c></row>"#,
        Some("<si><t>Alice</t></si>"),
    );
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let data = data.clone();
            std::thread::spawn(move || read_bytes(data, &SheetSelector::First).unwrap())
        })
        .collect();
    for handle in handles {
        let rows = handle.join().unwrap();
        assert_eq!(rows[0].get("A"), Some("Alice"));
    }
}
