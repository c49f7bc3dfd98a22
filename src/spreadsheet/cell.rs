use crate::spreadsheet::reference::index_to_reference;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Timelike;
use iso8601_duration::Duration as IsoDuration;
use once_cell::sync::Lazy;
use std::fmt::Display;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Day zero of serial dates in the 1900 date system, valid from 1900-03-01 on
static SERIAL_EPOCH: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(1899, 12, 30).expect("Hardcode serial epoch"));

/// Storage kinds of cells in workbook files.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    /// Boolean values stored as `1`/`0`
    Boolean,
    /// Numeric values
    Number,
    /// ISO 8601 date/time strings, decoded to serial dates
    IsoDateTime,
    /// ISO 8601 durations (ODS times), decoded to fractions of a day
    IsoDuration,
    /// Inline string values
    InlineString,
    /// Shared string table references
    SharedString,
    /// Error values
    Error,
}

impl CellType {
    /// Converts a stored value into a typed value. Shared strings must already be resolved.
    pub(crate) fn to_value(self, raw: String) -> Option<CellValue> {
        match self {
            CellType::Empty | CellType::Error => None,
            CellType::Boolean => Some(CellValue::Boolean(raw == "1" || raw.eq_ignore_ascii_case("true"))),
            CellType::Number => match raw.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => Some(CellValue::Number(number)),
                _ => Some(CellValue::Text(raw)),
            },
            CellType::IsoDateTime => Some(match iso_datetime_to_serial(&raw) {
                Some(serial) => CellValue::Number(serial),
                None => CellValue::Text(raw),
            }),
            CellType::IsoDuration => Some(match iso_duration_to_days(&raw) {
                Some(days) => CellValue::Number(days),
                None => CellValue::Text(raw),
            }),
            CellType::InlineString | CellType::SharedString => Some(CellValue::Text(raw)),
        }
    }
}

/// Converts `2024-04-01` or `2024-04-01T08:30:00` to a serial date, the way xlsx stores dates.
fn iso_datetime_to_serial(value: &str) -> Option<f64> {
    let value = value.trim().trim_end_matches('Z');
    let datetime = match NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(datetime) => datetime,
        Err(_) => NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0)?,
    };
    let days = (datetime.date() - *SERIAL_EPOCH).num_days() as f64;
    let time = datetime.time();
    let seconds = time.num_seconds_from_midnight() as f64 + time.nanosecond() as f64 / 1e9;
    Some(days + seconds / SECONDS_PER_DAY)
}

/// Converts an ODS time such as `PT12H00M00S` to a fraction of a day (`0.5`).
fn iso_duration_to_days(value: &str) -> Option<f64> {
    let duration = value.trim().parse::<IsoDuration>().ok()?;
    let seconds = f64::from(duration.day) * SECONDS_PER_DAY
        + f64::from(duration.hour) * 3_600.0
        + f64::from(duration.minute) * 60.0
        + f64::from(duration.second);
    // Microsecond precision, as stored by spreadsheet applications
    let seconds = (seconds * 1e6).round() / 1e6;
    Some(seconds / SECONDS_PER_DAY).filter(|days| days.is_finite())
}

/// Typed scalar held by a decoded cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    /// Text, shared or inline
    Text(String),
    /// Numeric value, including serial dates
    Number(f64),
    /// Boolean values (true/false)
    Boolean(bool),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl Display for CellValue {
    /// Renders the value the way every attendance rule reads it:
    /// text verbatim, numbers in shortest form (`101`, `2.5`), booleans as `true`/`false`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Number(number) if *number == 0.0 => write!(f, "0"), // -0 prints as 0
            CellValue::Number(number) => write!(f, "{}", number),
            CellValue::Boolean(value) => write!(f, "{}", value),
        }
    }
}

/// Represents a single decoded cell with its position.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
    pub value: CellValue,
}

impl Cell {
    pub fn new<V: Into<CellValue>>(row: usize, col: usize, value: V) -> Self {
        Cell {
            row,
            col,
            value: value.into(),
        }
    }

    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.value.fmt(f)
    }
}
