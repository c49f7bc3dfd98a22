//! # Workbook Decoding
//!
//! Opens Office Open XML (`.xlsx`, `.xlsm`) and OpenDocument (`.ods`) workbooks, lists their
//! sheets and decodes a single sheet into a sparse [`Grid`]. The format is detected from the
//! archive content, so uploads stored under arbitrary file names open the same way.
use crate::error::AttendanceError;
use crate::error::WorkbookError;
use crate::helpers::reader::UnifiedReader;
use crate::helpers::zip::ZipHelper;
use crate::spreadsheet::ods::OdsSpreadsheet;
use crate::spreadsheet::xlsx::XlsxSpreadsheet;
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;

pub mod cell;
pub mod criteria;
pub mod grid;
pub(crate) mod ods;
pub mod reference;
pub(crate) mod xlsx;

pub use cell::{Cell, CellValue};
pub use criteria::Criteria;
pub use grid::{Grid, Range};

/// MIME type stored in the `mimetype` entry of OpenDocument spreadsheets
const ODS_MIME_TYPE: &[u8] = b"application/vnd.oasis.opendocument.spreadsheet";

/// Errors raised while locating parts and cells inside a workbook archive.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("Cannot detect workbook format of '{0}'")]
    UnsupportedFormat(String),

    #[error("Missing workbook part '{0}'")]
    FileError(String),

    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("Error value '{3}' in cell {2} of sheet '{1}' in '{0}'")]
    CellValueError(String, String, String, String),
}

/// Common interface of the format-specific readers.
pub(crate) trait Spreadsheet: Send {
    /// Source name of the workbook
    fn name(&self) -> String;

    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Decodes one sheet into a grid
    fn read_grid(&mut self, sheet_name: &str, criteria: &Criteria) -> Result<Grid, WorkbookError>;
}

/// A decoded workbook: the list of sheet names plus on-demand access to each sheet's grid.
pub struct Workbook {
    spreadsheet: Box<dyn Spreadsheet>,
}

impl Workbook {
    /// Opens a workbook file from disk.
    ///
    /// # Errors
    /// `FileNotFound` when the path does not exist, `UnreadableWorkbook` for anything that is not
    /// a readable xlsx/ods archive.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Workbook, AttendanceError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        UnifiedReader::open(path)
            .and_then(|reader| detect(&name, reader))
            .map(|spreadsheet| Workbook { spreadsheet })
            .map_err(|error| AttendanceError::from_workbook(&path.to_string_lossy(), error))
    }

    /// Opens a workbook already held in memory, e.g. an uploaded file.
    pub fn from_bytes(name: &str, bytes: Vec<u8>) -> Result<Workbook, AttendanceError> {
        detect(name, UnifiedReader::from_bytes(bytes))
            .map(|spreadsheet| Workbook { spreadsheet })
            .map_err(|error| AttendanceError::from_workbook(name, error))
    }

    /// File name of the workbook, without directories.
    pub fn name(&self) -> String {
        self.spreadsheet.name()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.spreadsheet.sheet_names()
    }

    /// Decodes the named sheet into a grid.
    pub fn read_grid(&mut self, sheet_name: &str, criteria: &Criteria) -> Result<Grid, AttendanceError> {
        let name = self.spreadsheet.name();
        self.spreadsheet
            .read_grid(sheet_name, criteria)
            .map_err(|error| AttendanceError::from_workbook(&name, error))
    }
}

/// Picks the reader from the parts present in the archive.
fn detect(name: &str, reader: UnifiedReader) -> Result<Box<dyn Spreadsheet>, WorkbookError> {
    let mut zip = ZipArchive::new(reader)?;
    if zip.contains("xl/workbook.xml") {
        Ok(Box::new(XlsxSpreadsheet::open(name, zip)?))
    } else if is_ods(&mut zip)? {
        Ok(Box::new(OdsSpreadsheet::open(name, zip)?))
    } else {
        Err(SpreadsheetError::UnsupportedFormat(name.to_owned()).into())
    }
}

fn is_ods(zip: &mut ZipArchive<UnifiedReader>) -> Result<bool, WorkbookError> {
    match zip.read_bytes("mimetype")? {
        Some(mime_type) => Ok(mime_type.trim_ascii() == ODS_MIME_TYPE),
        None => Ok(zip.contains("content.xml")),
    }
}
