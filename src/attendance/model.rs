//! Plain records produced by the extraction engine.
//!
//! Field names serialize the way the attendance API clients read them (`otHours`,
//! `presentAddress`, day codes `P`/`A`/`WO`).
use serde::Deserialize;
use serde::Serialize;

/// An employee row of the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub number: String,
    pub name: String,
}

impl Employee {
    pub fn new(number: &str, name: &str) -> Self {
        Employee {
            number: number.to_owned(),
            name: name.to_owned(),
        }
    }

    /// Dedup key: the number when present, otherwise the name.
    pub fn key(&self) -> &str {
        if self.number.is_empty() {
            &self.name
        } else {
            &self.number
        }
    }
}

/// Attendance code of a single day.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayCode {
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
    #[serde(rename = "WO")]
    Weekoff,
    #[default]
    #[serde(rename = "")]
    Unknown,
}

/// Status of one calendar day for one employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayStatus {
    /// 1..=31
    pub day: u8,
    pub code: DayCode,
    pub ot: f64,
}

/// Monthly counters of one employee.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: f64,
    pub absent: f64,
    pub weekoff: f64,
    pub ot_hours: f64,
    /// Attendance days, `present + weekoff` unless the sheet states it
    pub atd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kitchen: Option<f64>,
}

/// Contact and department columns of an employee row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl EmployeeDetails {
    pub fn is_empty(&self) -> bool {
        self.mobile1.is_none()
            && self.mobile2.is_none()
            && self.present_address.is_none()
            && self.department.is_none()
    }
}

/// Roster listing of a workbook.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmployeesReport {
    pub file: String,
    pub employees: Vec<Employee>,
}

/// Monthly counters of a matched employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub file: String,
    pub employee: Employee,
    pub summary: AttendanceSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<EmployeeDetails>,
}

/// Day-by-day statuses of a matched employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub file: String,
    pub employee: Employee,
    pub days: Vec<DayStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<EmployeeDetails>,
}

/// Counters and daily statuses computed from one located day-column window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReport {
    pub file: String,
    pub employee: Employee,
    pub summary: AttendanceSummary,
    pub days: Vec<DayStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<EmployeeDetails>,
}
