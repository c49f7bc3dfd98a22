//! Extraction engine: turns the attendance sheet of a workbook into a roster, monthly
//! summaries and daily statuses.
//!
//! Every step is a pure function over an immutable [`Grid`]; [`AttendanceSheet`] bundles the
//! located sheet with the file it came from and answers the report queries.
pub mod classifier;
pub mod columns;
pub mod daily;
pub mod details;
pub mod locator;
pub mod matcher;
pub mod model;
pub mod roster;
pub mod rules;
pub mod summary;

use crate::error::AttendanceError;
use crate::spreadsheet::Criteria;
use crate::spreadsheet::Grid;
use crate::spreadsheet::Workbook;
use std::path::Path;
use thiserror::Error;

pub use classifier::{classify, CellClass};
pub use columns::locate_first_day_column;
pub use daily::build_daily_grid;
pub use details::extract_details;
pub use locator::locate_attendance_sheet;
pub use matcher::{find_employee, EmployeeMatch, EmployeeQuery};
pub use model::*;
pub use roster::extract_roster;
pub use summary::compute_summary;

/// Lookup failures of the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Sheet 'present' not found")]
    SheetNotFound,

    #[error("Employee not found")]
    EmployeeNotFound,
}

/// The attendance sheet of one workbook, decoded and ready for queries.
#[derive(Clone, Debug)]
pub struct AttendanceSheet {
    /// File name the reports are labelled with
    file: String,
    grid: Grid,
}

impl AttendanceSheet {
    /// Opens a workbook from disk and decodes its attendance sheet.
    pub fn open<P: AsRef<Path>>(path: P, criteria: &Criteria) -> Result<Self, AttendanceError> {
        let mut workbook = Workbook::open(path)?;
        AttendanceSheet::from_workbook(&mut workbook, criteria)
    }

    /// Locates the attendance sheet among the workbook's sheets and decodes it.
    pub fn from_workbook(workbook: &mut Workbook, criteria: &Criteria) -> Result<Self, AttendanceError> {
        let sheet_names = workbook.sheet_names();
        let sheet_name = locate_attendance_sheet(&sheet_names, criteria)?;
        let grid = workbook.read_grid(sheet_name, criteria)?;
        Ok(AttendanceSheet::from_grid(&workbook.name(), grid))
    }

    /// Wraps an already decoded grid.
    pub fn from_grid(file: &str, grid: Grid) -> Self {
        AttendanceSheet {
            file: file.to_owned(),
            grid,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn sheet_name(&self) -> &str {
        self.grid.name()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Lists the distinct employees of the sheet.
    pub fn employees(&self) -> EmployeesReport {
        EmployeesReport {
            file: self.file.to_owned(),
            employees: extract_roster(&self.grid),
        }
    }

    /// Monthly counters and details of the first employee matching `query`.
    pub fn summary(&self, query: &EmployeeQuery) -> Result<SummaryReport, AttendanceError> {
        let EmployeeMatch { row, employee } = find_employee(&self.grid, query)?;
        let first_day_col = locate_first_day_column(&self.grid, row);
        Ok(SummaryReport {
            file: self.file.to_owned(),
            employee,
            summary: compute_summary(&self.grid, row, first_day_col),
            details: self.details(row),
        })
    }

    /// Day-by-day statuses and details of the first employee matching `query`.
    pub fn daily(&self, query: &EmployeeQuery) -> Result<DailyReport, AttendanceError> {
        let EmployeeMatch { row, employee } = find_employee(&self.grid, query)?;
        let first_day_col = locate_first_day_column(&self.grid, row);
        Ok(DailyReport {
            file: self.file.to_owned(),
            employee,
            days: build_daily_grid(&self.grid, row, first_day_col),
            details: self.details(row),
        })
    }

    /// Summary and daily statuses together, sharing one day-column search.
    pub fn attendance(&self, query: &EmployeeQuery) -> Result<AttendanceReport, AttendanceError> {
        let EmployeeMatch { row, employee } = find_employee(&self.grid, query)?;
        let first_day_col = locate_first_day_column(&self.grid, row);
        Ok(AttendanceReport {
            file: self.file.to_owned(),
            employee,
            summary: compute_summary(&self.grid, row, first_day_col),
            days: build_daily_grid(&self.grid, row, first_day_col),
            details: self.details(row),
        })
    }

    fn details(&self, row: usize) -> Option<EmployeeDetails> {
        Some(extract_details(&self.grid, row)).filter(|details| !details.is_empty())
    }
}
