//! Column contract and string rules shared by every extraction step.
//!
//! Column indexes are 0-based and come from the fixed attendance template; existing files
//! depend on them, so they are constants rather than configuration.
use once_cell::sync::Lazy;
use regex::Regex;

/// Sheet-name keywords of the attendance sheet, including the common misspelling
pub const SHEET_NAME_KEYWORDS: [&str; 2] = ["present", "presant"];

/// Employee number (column B)
pub const NUMBER_COL: usize = 1;
/// Employee name (column C)
pub const NAME_COL: usize = 2;

/// Summary override: present days (AJ)
pub const PRESENT_COL: usize = 35;
/// Summary override: absent days (AK)
pub const ABSENT_COL: usize = 36;
/// Summary override: week-off days (AL)
pub const WEEKOFF_COL: usize = 37;
/// Summary value: minus (AN)
pub const MINUS_COL: usize = 39;
/// Summary override: attendance days (AO)
pub const ATD_COL: usize = 40;
/// Summary override: overtime hours (AP)
pub const OT_COL: usize = 41;
/// Summary value: kitchen (AQ)
pub const KITCHEN_COL: usize = 42;

/// Department (AW)
pub const DEPARTMENT_COL: usize = 48;
/// First mobile number (BB)
pub const MOBILE1_COL: usize = 53;
/// Second mobile number (BC)
pub const MOBILE2_COL: usize = 54;
/// Present address (BR)
pub const PRESENT_ADDRESS_COL: usize = 69;

/// Slots in a monthly daily grid
pub const DAYS_IN_MONTH: usize = 31;

/// Header label of the number column: "No" or "No."
static HEADER_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^no\.?$").expect("Hardcode regex pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Hardcode regex pattern"));
/// Leading decimal literal: sign, ASCII digits, optional fraction and exponent
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").expect("Hardcode regex pattern")
});

/// Checks if an identity cell marks a row to skip: blank, a "No." header label, or a lone dot.
pub fn is_ignored(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || HEADER_LABEL.is_match(value) || value == "."
}

/// Comparison key of an employee number or name: periods removed, whitespace collapsed,
/// trimmed and uppercased.
pub fn normalize_for_compare(value: &str) -> String {
    let without_periods = value.replace('.', "");
    WHITESPACE
        .replace_all(&without_periods, " ")
        .trim()
        .to_uppercase()
}

/// Parses the leading decimal number of a cell text.
///
/// Leading whitespace is skipped and trailing text ignored, so `" 2 days"` reads as `2`.
/// Returns `None` when no digits lead the text or the value is not finite.
pub fn parse_number(value: &str) -> Option<f64> {
    let literal = LEADING_NUMBER.find(value.trim_start())?;
    literal
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignored_identity_cells() {
        assert!(is_ignored(""));
        assert!(is_ignored("   "));
        assert!(is_ignored("No"));
        assert!(is_ignored("no."));
        assert!(is_ignored(" NO. "));
        assert!(is_ignored("."));
        assert!(!is_ignored("No.1"));
        assert!(!is_ignored("Noor"));
        assert!(!is_ignored(".."));
        assert!(!is_ignored("101"));
    }

    #[test]
    fn compare_normalization() {
        assert_eq!(normalize_for_compare("101."), "101");
        assert_eq!(normalize_for_compare("john   doe"), "JOHN DOE");
        assert_eq!(normalize_for_compare(" J.  R.\tSmith "), "J R SMITH");
        assert_eq!(normalize_for_compare("..."), "");
    }

    #[test]
    fn leading_numbers() {
        assert_eq!(parse_number("2"), Some(2.0));
        assert_eq!(parse_number("  2.5"), Some(2.5));
        assert_eq!(parse_number("3 days"), Some(3.0));
        assert_eq!(parse_number("-1"), Some(-1.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("4."), Some(4.0));
        assert_eq!(parse_number("1e2x"), Some(100.0));
        assert_eq!(parse_number("1e"), Some(1.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("P"), None);
        assert_eq!(parse_number("x2"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("1e999"), None);
    }

    #[test]
    fn non_ascii_digits_end_the_number() {
        assert_eq!(parse_number("1\u{0663}"), Some(1.0));
        assert_eq!(parse_number("2.5\u{0665}0"), Some(2.5));
        assert_eq!(parse_number("\u{0663}"), None);
    }
}
