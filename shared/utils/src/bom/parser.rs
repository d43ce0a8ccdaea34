//! BOM File Parser
//!
//! Multi-format extraction of bill of materials files into canonical tables.
//! Each extractor returns a `Result`; [`BomParser::parse_bytes`] is the
//! boundary where any failure degrades to an empty canonical table.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use bomdiff_models::CanonicalTable;

use super::cell::RawCell;
use super::docx;
use super::normalizer::normalize;
use super::table::{split_whitespace_row, RawTable};
use crate::config::ExtractionConfig;
use crate::error::ExtractionError;

/// Supported BOM file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomFormat {
    Spreadsheet, // XLSX
    Csv,
    DelimitedText, // TXT
    Document,      // DOCX
    Pdf,
}

impl BomFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        Self::from_tag(&ext)
    }

    /// Detect format from a bare extension tag such as `"xlsx"`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().trim_start_matches('.').to_lowercase().as_str() {
            "xlsx" => Some(Self::Spreadsheet),
            "csv" => Some(Self::Csv),
            "txt" => Some(Self::DelimitedText),
            "docx" => Some(Self::Document),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Detect format from content type header
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Some(Self::Spreadsheet),
            "text/csv" | "application/csv" => Some(Self::Csv),
            "text/plain" => Some(Self::DelimitedText),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => Some(Self::Document),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "xlsx",
            Self::Csv => "csv",
            Self::DelimitedText => "txt",
            Self::Document => "docx",
            Self::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for BomFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main BOM parser
#[derive(Debug, Clone)]
pub struct BomParser {
    /// Delimiter for `.txt` inputs; whitespace runs when `None`.
    delimiter: Option<String>,
    /// Promote a recognizable first `.txt` line to a header.
    promote_header_row: bool,
}

impl Default for BomParser {
    fn default() -> Self {
        Self {
            delimiter: None,
            promote_header_row: false,
        }
    }
}

impl BomParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            delimiter: config.txt_delimiter.clone().filter(|d| !d.is_empty()),
            promote_header_row: config.promote_header_row,
        }
    }

    /// Override the delimiter for `.txt` inputs
    pub fn with_delimiter(mut self, delimiter: Option<impl Into<String>>) -> Self {
        self.delimiter = delimiter.map(Into::into).filter(|d: &String| !d.is_empty());
        self
    }

    /// Configure first-line header promotion for `.txt` inputs
    pub fn with_header_promotion(mut self, enabled: bool) -> Self {
        self.promote_header_row = enabled;
        self
    }

    /// Parse BOM bytes of a known format into a canonical table.
    ///
    /// Never fails; extraction errors are logged and yield an empty table.
    pub fn parse_bytes(&self, data: &[u8], format: BomFormat) -> CanonicalTable {
        match self.extract(data, format) {
            Ok(raw) => {
                let table = normalize(&raw);
                tracing::debug!(%format, rows = table.len(), "Parsed BOM");
                table
            }
            Err(e) => {
                tracing::warn!(%format, code = e.error_code(), error = %e, "BOM extraction failed, using empty table");
                CanonicalTable::empty()
            }
        }
    }

    /// Parse BOM bytes, detecting the format from `filename`.
    ///
    /// Unknown extensions yield an empty table.
    pub fn parse_named(&self, filename: &str, data: &[u8]) -> CanonicalTable {
        match BomFormat::from_extension(Path::new(filename)) {
            Some(format) => self.parse_bytes(data, format),
            None => {
                tracing::warn!(filename, "Unsupported BOM file type, using empty table");
                CanonicalTable::empty()
            }
        }
    }

    /// Run the format-specific extractor without normalizing.
    pub fn extract(&self, data: &[u8], format: BomFormat) -> Result<RawTable, ExtractionError> {
        match format {
            BomFormat::Spreadsheet => self.extract_spreadsheet(data),
            BomFormat::Csv => self.extract_csv(data),
            BomFormat::DelimitedText => Ok(self.extract_text(data)),
            BomFormat::Document => {
                let content = docx::read_document(data)?;
                Ok(self.document_table(content))
            }
            BomFormat::Pdf => self.extract_pdf(data),
        }
    }

    /// First sheet, first row as header.
    fn extract_spreadsheet(&self, data: &[u8]) -> Result<RawTable, ExtractionError> {
        use calamine::{open_workbook_from_rs, Reader, Xlsx};

        let cursor = std::io::Cursor::new(data);
        let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(ExtractionError::EmptyWorkbook)?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .ok_or(ExtractionError::EmptyWorkbook)??;

        let mut rows_iter = range.rows();

        // First row is headers
        let Some(header_row) = rows_iter.next() else {
            return Ok(RawTable::empty());
        };
        let headers: Vec<String> = header_row.iter().map(|cell| RawCell::from(cell).clean()).collect();

        let rows = rows_iter
            .map(|row| row.iter().map(RawCell::from).collect())
            .collect();

        Ok(RawTable::with_header(headers, rows))
    }

    /// Comma separated with a header row.
    fn extract_csv(&self, data: &[u8]) -> Result<RawTable, ExtractionError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(data);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in reader.byte_records().enumerate() {
            match result {
                Ok(record) => rows.push(
                    record
                        .iter()
                        .map(|field| csv_cell(&String::from_utf8_lossy(field)))
                        .collect(),
                ),
                Err(e) => tracing::warn!(row = idx + 2, error = %e, "Skipping unreadable CSV row"),
            }
        }

        Ok(RawTable::with_header(headers, rows))
    }

    /// Non-blank lines split on the delimiter, or on whitespace runs.
    fn extract_text(&self, data: &[u8]) -> RawTable {
        let content = decode_lossy(data);

        let rows: Vec<Vec<RawCell>> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| match &self.delimiter {
                Some(delimiter) => line.split(delimiter.as_str()).map(RawCell::from).collect(),
                None => split_whitespace_row(line),
            })
            .collect();

        if self.promote_header_row {
            RawTable::headerless_detect(rows)
        } else {
            RawTable::headerless(rows)
        }
    }

    /// Every non-blank text line, whitespace split; never has a header.
    fn extract_pdf(&self, data: &[u8]) -> Result<RawTable, ExtractionError> {
        // pdf-extract panics on some malformed inputs
        let text = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(data)))
            .map_err(|_| ExtractionError::Pdf("PDF parser panicked".to_string()))?
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(split_whitespace_row)
            .collect();

        Ok(RawTable::headerless(rows))
    }

    /// First table with its first row as header, or paragraphs as rows.
    fn document_table(&self, content: docx::DocumentContent) -> RawTable {
        match content.tables.into_iter().next() {
            Some(table) if table.len() > 1 => {
                let mut rows = table.into_iter();
                let header = rows.next().unwrap_or_default();
                let body = rows
                    .map(|row| row.into_iter().map(RawCell::from).collect())
                    .collect();
                RawTable::with_header(header, body)
            }
            Some(table) => RawTable::headerless(
                table
                    .into_iter()
                    .map(|row| row.into_iter().map(RawCell::from).collect())
                    .collect(),
            ),
            None => {
                let rows = content
                    .paragraphs
                    .iter()
                    .map(|p| p.trim())
                    .filter(|p| !p.is_empty())
                    .map(split_whitespace_row)
                    .collect();
                RawTable::headerless(rows)
            }
        }
    }
}

fn csv_cell(field: &str) -> RawCell {
    if field.trim().is_empty() {
        RawCell::Null
    } else {
        RawCell::from(field)
    }
}

/// Decode as UTF-8, dropping undecodable bytes and a leading byte-order mark.
fn decode_lossy(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER && *c != '\u{feff}')
        .collect()
}
