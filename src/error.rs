use crate::attendance::ExtractionError;
use thiserror::Error;

/// Error raised while decoding a workbook into grids.
/// Aggregates errors from the standard library, dependencies, and the reader modules.
#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("{0}")]
    WithContextError(String),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error("{0}")]
    StringEncodingError(#[from] std::str::Utf8Error),

    // Third-party library errors
    #[error("{0}")]
    PatternError(#[from] glob::PatternError),

    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    // Helper module errors
    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    #[error("{0}")]
    OdsError(#[from] crate::spreadsheet::ods::OdsError),
}

/// Public error type returned by every attendance operation.
#[derive(Error, Debug)]
pub enum AttendanceError {
    /// The workbook file does not exist.
    #[error("File not found: '{0}'")]
    FileNotFound(String),

    /// The workbook exists but could not be decoded.
    #[error("Unable to read workbook '{name}': {source}")]
    UnreadableWorkbook {
        name: String,
        #[source]
        source: WorkbookError,
    },

    /// Neither an employee number nor a name was supplied.
    #[error("Provide an employee number or name")]
    InvalidQuery,

    /// Sheet lookup or employee lookup failed.
    #[error("{0}")]
    ExtractionError(#[from] ExtractionError),
}

impl AttendanceError {
    /// Classifies a decode failure for the workbook `name`.
    pub(crate) fn from_workbook(name: &str, error: WorkbookError) -> Self {
        match error {
            WorkbookError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                AttendanceError::FileNotFound(name.to_owned())
            }
            source => AttendanceError::UnreadableWorkbook {
                name: name.to_owned(),
                source,
            },
        }
    }
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, WorkbookError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| WorkbookError::WithContextError(format!("{}: {}", message, e)))
    }
}
