#![allow(dead_code)]

use attendance_sheet::spreadsheet::reference::index_to_reference;
use std::io::Cursor;
use std::io::Write;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

/// Rows of one sheet; `""` leaves a cell out, numeric-looking text is written as a number.
pub type Rows<'a> = &'a [&'a [&'a str]];

/// The April sheet used across the pipeline tests.
pub const APRIL: Rows = &[
    &["", "No.", "Name"],
    &["", "101", "John Doe", "P", "P", "A", "WO", "P"],
    &["", "102", "Jane Roe", "A", "P/OT2", "P", "P", "WO"],
];

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn is_number(text: &str) -> bool {
    text.parse::<f64>().map(|number| number.is_finite()).unwrap_or(false)
}

fn is_date(text: &str) -> bool {
    chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

fn archive(entries: &[(&str, String)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        let options = if *name == "mimetype" {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        } else {
            SimpleFileOptions::default()
        };
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Builds an `.xlsx` archive; text goes through the shared string table.
pub fn xlsx(sheets: &[(&str, Rows)]) -> Vec<u8> {
    let mut shared_strings: Vec<String> = Vec::new();
    let mut entries = Vec::new();
    let mut workbook_sheets = String::new();
    let mut relationships = String::new();
    for (index, (name, rows)) in sheets.iter().enumerate() {
        let id = index + 1;
        workbook_sheets.push_str(&format!(
            r#"<sheet name="{}" sheetId="{id}" r:id="rId{id}"/>"#,
            escape(name)
        ));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{id}.xml"/>"#
        ));
        let mut data = String::new();
        for (row, values) in rows.iter().enumerate() {
            data.push_str(&format!(r#"<row r="{}">"#, row + 1));
            for (col, value) in values.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let reference = index_to_reference(row, col);
                if is_number(value) {
                    data.push_str(&format!(r#"<c r="{reference}"><v>{value}</v></c>"#));
                } else if let Some(error) = value.strip_prefix('#') {
                    data.push_str(&format!(r#"<c r="{reference}" t="e"><v>#{}</v></c>"#, escape(error)));
                } else {
                    let index = shared_strings.iter().position(|text| text == value).unwrap_or_else(|| {
                        shared_strings.push(value.to_string());
                        shared_strings.len() - 1
                    });
                    data.push_str(&format!(r#"<c r="{reference}" t="s"><v>{index}</v></c>"#));
                }
            }
            data.push_str("</row>");
        }
        entries.push((
            format!("xl/worksheets/sheet{id}.xml"),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{data}</sheetData></worksheet>"#
            ),
        ));
    }
    let strings: String = shared_strings
        .iter()
        .map(|text| format!(r#"<si><t xml:space="preserve">{}</t></si>"#, escape(text)))
        .collect();
    entries.push((
        "xl/sharedStrings.xml".to_owned(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{strings}</sst>"#,
            shared_strings.len()
        ),
    ));
    entries.push((
        "xl/workbook.xml".to_owned(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{workbook_sheets}</sheets></workbook>"#
        ),
    ));
    entries.push((
        "xl/_rels/workbook.xml.rels".to_owned(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{relationships}</Relationships>"#
        ),
    ));
    let entries: Vec<(&str, String)> = entries.iter().map(|(name, content)| (name.as_str(), content.clone())).collect();
    archive(&entries)
}

/// Builds an `.ods` archive; runs of blank cells are written as one repeated cell.
/// `PT..` values become time cells and `YYYY-MM-DD` values date cells.
pub fn ods(sheets: &[(&str, Rows)]) -> Vec<u8> {
    let mut tables = String::new();
    for (name, rows) in sheets {
        tables.push_str(&format!(r#"<table:table table:name="{}">"#, escape(name)));
        for values in rows.iter() {
            tables.push_str("<table:table-row>");
            let mut blanks = 0;
            for value in values.iter() {
                if value.is_empty() {
                    blanks += 1;
                    continue;
                }
                if blanks > 0 {
                    tables.push_str(&format!(r#"<table:table-cell table:number-columns-repeated="{blanks}"/>"#));
                    blanks = 0;
                }
                if is_number(value) {
                    tables.push_str(&format!(
                        r#"<table:table-cell office:value-type="float" office:value="{value}"><text:p>{value}</text:p></table:table-cell>"#
                    ));
                } else if value.starts_with("PT") {
                    tables.push_str(&format!(
                        r#"<table:table-cell office:value-type="time" office:time-value="{value}"><text:p>{value}</text:p></table:table-cell>"#
                    ));
                } else if is_date(value) {
                    tables.push_str(&format!(
                        r#"<table:table-cell office:value-type="date" office:date-value="{value}"><text:p>{value}</text:p></table:table-cell>"#
                    ));
                } else {
                    tables.push_str(&format!(
                        r#"<table:table-cell office:value-type="string"><text:p>{}</text:p></table:table-cell>"#,
                        escape(value)
                    ));
                }
            }
            tables.push_str("</table:table-row>");
        }
        tables.push_str("</table:table>");
    }
    let content = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" office:version="1.2"><office:body><office:spreadsheet>{tables}</office:spreadsheet></office:body></office:document-content>"#
    );
    archive(&[
        ("mimetype", "application/vnd.oasis.opendocument.spreadsheet".to_owned()),
        ("content.xml", content),
    ])
}
