use crate::attendance::model::DayCode;
use once_cell::sync::Lazy;
use regex::Regex;

/// Inline overtime marker, e.g. `P OT2`, `OT 1.5`
static INLINE_OT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"OT\s*([0-9]+(?:\.[0-9]+)?)?").expect("Hardcode regex pattern"));

const PRESENT_CODES: [&str; 3] = ["P", "PR", "PRESENT"];
const ABSENT_CODES: [&str; 2] = ["A", "ABSENT"];
const WEEKOFF_CODES: [&str; 4] = ["WO", "W/O", "WEEKOFF", "WEEK OFF"];

/// Classification of one daily attendance cell.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CellClass {
    pub code: DayCode,
    /// Inline overtime hours, 0 when the cell carries none
    pub ot: f64,
}

impl CellClass {
    /// Checks if the cell carries a present, absent or week-off code.
    pub fn has_code(&self) -> bool {
        self.code != DayCode::Unknown
    }
}

/// Classifies a raw cell text into an attendance code and inline overtime.
///
/// Matching is case-insensitive on the trimmed text. Present wins over absent, and absent
/// over week-off; `P/...` variants (`P/2`, `P/OT`) count as present.
pub fn classify(raw: &str) -> CellClass {
    let text = raw.trim().to_uppercase();
    if text.is_empty() {
        return CellClass::default();
    }
    let code = if PRESENT_CODES.contains(&text.as_str()) || text.starts_with("P/") {
        DayCode::Present
    } else if ABSENT_CODES.contains(&text.as_str()) {
        DayCode::Absent
    } else if WEEKOFF_CODES.contains(&text.as_str()) {
        DayCode::Weekoff
    } else {
        DayCode::Unknown
    };
    CellClass {
        code,
        ot: inline_ot(&text),
    }
}

/// Hours following the first `OT` marker of an uppercased text; 0 without a number.
pub fn inline_ot(text: &str) -> f64 {
    INLINE_OT
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|hours| hours.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}
