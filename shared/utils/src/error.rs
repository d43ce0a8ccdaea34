use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level errors surfaced by the CLI and configuration layers.
///
/// The normalize/aggregate/compare pipeline never produces these; extraction
/// failures are reported through [`ExtractionError`] and collapse to an empty
/// table at the parser boundary.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum BomDiffError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("I/O error: {path} - {message}")]
    Io { path: String, message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Export error: {message}")]
    Export { message: String },
}

impl BomDiffError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Io { .. } => "IO_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
            Self::Export { .. } => "EXPORT_ERROR",
        }
    }

    /// Process exit code for the command-line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => 2,
            Self::Configuration { .. } => 3,
            Self::Io { .. } => 4,
            Self::Serialization { .. } | Self::Export { .. } => 5,
        }
    }
}

pub type BomDiffResult<T> = Result<T, BomDiffError>;

impl From<config::ConfigError> for BomDiffError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}

impl From<serde_json::Error> for BomDiffError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

impl From<csv::Error> for BomDiffError {
    fn from(error: csv::Error) -> Self {
        Self::export(error.to_string())
    }
}

/// Failure inside a single format extractor.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("Workbook has no sheets")]
    EmptyWorkbook,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Missing document part: {0}")]
    MissingPart(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Spreadsheet(_) | Self::EmptyWorkbook => "SPREADSHEET_ERROR",
            Self::Csv(_) => "CSV_ERROR",
            Self::Archive(_) | Self::Xml(_) | Self::MissingPart(_) => "DOCUMENT_ERROR",
            Self::Pdf(_) => "PDF_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let error = BomDiffError::validation("targets", "at least one target is required");
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.to_string(),
            "Validation error: targets - at least one target is required"
        );
    }

    #[test]
    fn test_extraction_error_codes() {
        assert_eq!(ExtractionError::EmptyWorkbook.error_code(), "SPREADSHEET_ERROR");
        assert_eq!(
            ExtractionError::MissingPart("word/document.xml".into()).error_code(),
            "DOCUMENT_ERROR"
        );
        assert_eq!(ExtractionError::Pdf("bad xref".into()).to_string(), "PDF error: bad xref");
    }
}
