use crate::{FunRunError, Result};
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Excel's limit on sheet name length
const MAX_SHEET_NAME_LEN: usize = 31;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES: &str = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// A single-sheet workbook of string cells
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    columns: Vec<(String, f64)>,
    rows: Vec<Vec<String>>,
}

impl Worksheet {
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty()
            || name.chars().count() > MAX_SHEET_NAME_LEN
            || name.contains(['[', ']', ':', '*', '?', '/', '\\'])
        {
            return Err(FunRunError::Export(format!("Invalid sheet name '{}'", name)));
        }

        Ok(Self {
            name: name.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
        })
    }

    /// Add a column with its header label and width in character widths
    pub fn add_column(&mut self, header: &str, width: f64) {
        self.columns.push((header.to_string(), width));
    }

    /// Append a data row, which must have one cell per column
    pub fn add_row(&mut self, cells: Vec<String>) -> Result<()> {
        if cells.len() != self.columns.len() {
            return Err(FunRunError::Export(format!(
                "Row has {} cells, sheet has {} columns",
                cells.len(),
                self.columns.len()
            )));
        }
        self.rows.push(cells);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Package the sheet as an `.xlsx` file
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("xl/workbook.xml", self.workbook_xml()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
            ("xl/worksheets/sheet1.xml", self.sheet_xml()),
        ];

        for (path, body) in parts {
            zip.start_file(path, options)?;
            zip.write_all(XML_HEADER.as_bytes())?;
            zip.write_all(body.as_bytes())?;
        }

        Ok(zip.finish()?.into_inner())
    }

    fn workbook_xml(&self) -> String {
        format!(
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
            escape_xml(&self.name)
        )
    }

    fn sheet_xml(&self) -> String {
        let mut xml = String::from(
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !self.columns.is_empty() {
            xml.push_str("<cols>");
            for (i, (_, width)) in self.columns.iter().enumerate() {
                let _ = write!(
                    xml,
                    r#"<col min="{n}" max="{n}" width="{w}" customWidth="1"/>"#,
                    n = i + 1,
                    w = width
                );
            }
            xml.push_str("</cols>");
        }

        xml.push_str("<sheetData>");
        let header = self.columns.iter().map(|(label, _)| label.as_str());
        write_row(&mut xml, 1, header);
        for (i, row) in self.rows.iter().enumerate() {
            write_row(&mut xml, i + 2, row.iter().map(String::as_str));
        }
        xml.push_str("</sheetData></worksheet>");
        xml
    }
}

fn write_row<'a>(xml: &mut String, row: usize, cells: impl Iterator<Item = &'a str>) {
    let _ = write!(xml, r#"<row r="{}">"#, row);
    for (col, value) in cells.enumerate() {
        let space = if value.trim() != value || value.contains("  ") {
            r#" xml:space="preserve""#
        } else {
            ""
        };
        let _ = write!(
            xml,
            r#"<c r="{}{}" t="inlineStr"><is><t{}>{}</t></is></c>"#,
            column_letter(col),
            row,
            space,
            escape_xml(value)
        );
    }
    xml.push_str("</row>");
}

/// Spreadsheet column name for a zero-based index (0 -> A, 26 -> AA)
fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Escape markup characters. Characters XML 1.0 cannot carry are written
/// with the OOXML `_xHHHH_` escape.
fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if !is_xml_char(c) => {
                let _ = write!(escaped, "_x{:04X}_", c as u32);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || ('\u{20}'..='\u{D7FF}').contains(&c)
        || ('\u{E000}'..='\u{FFFD}').contains(&c)
        || c >= '\u{10000}'
}
