//! Word document (DOCX) reader.
//!
//! Pulls body paragraphs and top-level tables out of `word/document.xml`.
//! Only text is kept; formatting, nested tables and other package parts are
//! ignored.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Text content of a DOCX body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentContent {
    /// Top-level tables as rows of trimmed cell text.
    pub tables: Vec<Vec<Vec<String>>>,
    /// Paragraphs directly in the body, outside any table.
    pub paragraphs: Vec<String>,
}

/// Open a DOCX package and read its main document part.
pub fn read_document(data: &[u8]) -> Result<DocumentContent, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

    let mut xml = Vec::new();
    {
        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => ExtractionError::MissingPart(DOCUMENT_PART.to_string()),
            other => other.into(),
        })?;
        part.read_to_end(&mut xml)?;
    }

    parse_document_xml(&xml)
}

/// Walk WordprocessingML and collect paragraphs and tables.
pub fn parse_document_xml(xml: &[u8]) -> Result<DocumentContent, ExtractionError> {
    let mut reader = Reader::from_reader(xml);
    let mut content = DocumentContent::default();
    let mut buf = Vec::new();

    let mut table_depth = 0usize;
    let mut table: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell: Vec<String> = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"tbl" => {
                    table_depth += 1;
                    if table_depth == 1 {
                        table = Vec::new();
                    }
                }
                b"tr" if table_depth == 1 => row = Vec::new(),
                b"tc" if table_depth == 1 => cell = Vec::new(),
                b"p" => paragraphs.push(String::new()),
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(ref e) if in_run => {
                if let Some(text) = paragraphs.last_mut() {
                    match e.local_name().as_ref() {
                        b"tab" => text.push('\t'),
                        b"br" | b"cr" => text.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(ref e) if in_text => {
                if let Some(text) = paragraphs.last_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"r" => in_run = false,
                b"p" => {
                    let text = paragraphs.pop().unwrap_or_default();
                    // Nested paragraphs (text boxes) belong to their container.
                    if paragraphs.is_empty() {
                        match table_depth {
                            0 => content.paragraphs.push(text),
                            1 => cell.push(text),
                            _ => {}
                        }
                    }
                }
                b"tc" if table_depth == 1 => row.push(cell.join("\n").trim().to_string()),
                b"tr" if table_depth == 1 => table.push(std::mem::take(&mut row)),
                b"tbl" => {
                    if table_depth == 1 {
                        content.tables.push(std::mem::take(&mut table));
                    }
                    table_depth = table_depth.saturating_sub(1);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(content)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    pub(crate) fn paragraph(text: &str) -> String {
        format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", text)
    }

    pub(crate) fn table(rows: &[&[&str]]) -> String {
        let body: String = rows
            .iter()
            .map(|cells| {
                let tcs: String = cells
                    .iter()
                    .map(|c| format!("<w:tc><w:tcPr/>{}</w:tc>", paragraph(c)))
                    .collect();
                format!("<w:tr>{}</w:tr>", tcs)
            })
            .collect();
        format!("<w:tbl><w:tblPr/>{}</w:tbl>", body)
    }

    pub(crate) fn document_xml(body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"{}\"><w:body>{}<w:sectPr/></w:body></w:document>",
            W_NS, body
        )
    }

    /// Minimal DOCX package holding only the main document part.
    pub(crate) fn docx_bytes(body: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(document_xml(body).as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_outside_tables() {
        let body = format!("{}{}{}", paragraph("Bill of materials"), paragraph(""), paragraph("X1 2 R1"));
        let content = parse_document_xml(document_xml(&body).as_bytes()).unwrap();

        assert!(content.tables.is_empty());
        assert_eq!(content.paragraphs, vec!["Bill of materials", "", "X1 2 R1"]);
    }

    #[test]
    fn test_table_cells_and_escapes() {
        let body = format!(
            "{}{}",
            paragraph("Intro"),
            table(&[&["MPN", "Qty"], &[" R&amp;D-1 ", "2"]])
        );
        let content = parse_document_xml(document_xml(&body).as_bytes()).unwrap();

        assert_eq!(content.paragraphs, vec!["Intro"]);
        assert_eq!(
            content.tables,
            vec![vec![
                vec!["MPN".to_string(), "Qty".to_string()],
                vec!["R&D-1".to_string(), "2".to_string()],
            ]]
        );
    }

    #[test]
    fn test_nested_tables_are_skipped() {
        let inner = table(&[&["inner"]]);
        let body = format!(
            "<w:tbl><w:tr><w:tc>{}{}</w:tc></w:tr></w:tbl>",
            paragraph("outer"),
            inner
        );
        let content = parse_document_xml(document_xml(&body).as_bytes()).unwrap();

        assert_eq!(content.tables, vec![vec![vec!["outer".to_string()]]]);
    }

    #[test]
    fn test_read_document_from_package() {
        let bytes = docx_bytes(&paragraph("hello"));
        let content = read_document(&bytes).unwrap();
        assert_eq!(content.paragraphs, vec!["hello"]);
    }

    #[test]
    fn test_package_without_document_part() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(matches!(read_document(&bytes), Err(ExtractionError::MissingPart(_))));
    }
}
