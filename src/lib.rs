//! # Attendance Sheet
//!
//! Reads monthly employee attendance out of `.xlsx` and `.ods` workbooks that follow a
//! loosely structured "present" sheet template.
//!
//! ## Features
//!
//! - **Workbook decoding**: pure-Rust Office Open XML and OpenDocument readers, with the format
//!   detected from the archive content
//! - **Sheet selection**: the first sheet whose name contains `present` (or the `presant`
//!   misspelling), configurable with glob patterns
//! - **Roster**: distinct employees in row order, header and blank rows skipped
//! - **Employee lookup**: by number and/or name, tolerant to periods, spacing and case
//! - **Monthly summary**: present, absent, week-off and overtime counts, replaced by the sheet's
//!   own summary columns when it states them
//! - **Daily grid**: 31 day statuses with overtime, even when the day block starts in a
//!   different column from file to file
//!
//! ## Example
//!
//! ```no_run
//! use attendance_sheet::{AttendanceSheet, Criteria, EmployeeQuery};
//!
//! let sheet = AttendanceSheet::open("uploads/april.xlsx", &Criteria::default())?;
//! for employee in sheet.employees().employees {
//!     println!("{} {}", employee.number, employee.name);
//! }
//! let report = sheet.summary(&EmployeeQuery::by_number("101")?)?;
//! println!("present {} absent {}", report.summary.present, report.summary.absent);
//! # Ok::<(), attendance_sheet::AttendanceError>(())
//! ```
pub mod attendance;
mod error;
mod helpers;
pub mod spreadsheet;

pub use attendance::{
    AttendanceReport, AttendanceSheet, AttendanceSummary, DailyReport, DayCode, DayStatus, Employee,
    EmployeeDetails, EmployeeQuery, EmployeesReport, ExtractionError, SummaryReport,
};
pub use error::{AttendanceError, WorkbookError};
pub use spreadsheet::{Cell, CellValue, Criteria, Grid, Range, Workbook};
