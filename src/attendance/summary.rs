use crate::attendance::classifier::classify;
use crate::attendance::model::AttendanceSummary;
use crate::attendance::model::DayCode;
use crate::attendance::rules::parse_number;
use crate::attendance::rules::ABSENT_COL;
use crate::attendance::rules::ATD_COL;
use crate::attendance::rules::DAYS_IN_MONTH;
use crate::attendance::rules::KITCHEN_COL;
use crate::attendance::rules::MINUS_COL;
use crate::attendance::rules::OT_COL;
use crate::attendance::rules::PRESENT_COL;
use crate::attendance::rules::WEEKOFF_COL;
use crate::spreadsheet::Grid;

/// Computes the monthly counters of `row` from the 31 day cells starting at `first_day_col`.
///
/// Counted values are replaced by the summary columns of the row when those parse as
/// numbers. `atd` is `present + weekoff` after those replacements, unless the row states it.
pub fn compute_summary(grid: &Grid, row: usize, first_day_col: usize) -> AttendanceSummary {
    let mut summary = AttendanceSummary::default();
    let last_col = grid.range().last_col.min(first_day_col + DAYS_IN_MONTH - 1);
    for col in first_day_col..=last_col {
        let class = classify(&grid.raw_text(row, col));
        match class.code {
            DayCode::Present => summary.present += 1.0,
            DayCode::Absent => summary.absent += 1.0,
            DayCode::Weekoff => summary.weekoff += 1.0,
            DayCode::Unknown => {}
        }
        summary.ot_hours += class.ot;
    }

    let stated = |col: usize| parse_number(&grid.raw_text(row, col));
    if let Some(present) = stated(PRESENT_COL) {
        summary.present = present;
    }
    if let Some(absent) = stated(ABSENT_COL) {
        summary.absent = absent;
    }
    if let Some(weekoff) = stated(WEEKOFF_COL) {
        summary.weekoff = weekoff;
    }
    if let Some(ot_hours) = stated(OT_COL) {
        summary.ot_hours = ot_hours;
    }
    summary.minus = stated(MINUS_COL);
    summary.kitchen = stated(KITCHEN_COL);
    summary.atd = stated(ATD_COL).unwrap_or(summary.present + summary.weekoff);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee_row(codes: &[&str]) -> Grid {
        let mut grid = Grid::new("Present");
        grid.set(0, 1, "No.");
        grid.set(0, 2, "Name");
        grid.set(1, 1, "101");
        grid.set(1, 2, "John Doe");
        for (offset, code) in codes.iter().enumerate() {
            grid.set(1, 3 + offset, *code);
        }
        grid
    }

    #[test]
    fn counts_day_codes() {
        let grid = employee_row(&["P", "P", "A", "WO", "P"]);
        assert_eq!(
            compute_summary(&grid, 1, 3),
            AttendanceSummary {
                present: 3.0,
                absent: 1.0,
                weekoff: 1.0,
                ot_hours: 0.0,
                atd: 4.0,
                minus: None,
                kitchen: None,
            }
        );
    }

    #[test]
    fn sums_inline_overtime() {
        let grid = employee_row(&["P/OT2", "OT 1.5", "p", "x OT"]);
        let summary = compute_summary(&grid, 1, 3);
        assert_eq!(summary.present, 2.0);
        assert_eq!(summary.ot_hours, 3.5);
    }

    #[test]
    fn stated_values_replace_counts() {
        let mut grid = employee_row(&["P", "P", "A", "WO", "P"]);
        grid.set(1, ABSENT_COL, "2");
        grid.set(1, OT_COL, 12.5);
        grid.set(1, MINUS_COL, " 1 day");
        grid.set(1, KITCHEN_COL, "n/a");
        let summary = compute_summary(&grid, 1, 3);
        assert_eq!(summary.present, 3.0);
        assert_eq!(summary.absent, 2.0);
        assert_eq!(summary.ot_hours, 12.5);
        assert_eq!(summary.minus, Some(1.0));
        assert_eq!(summary.kitchen, None);
        assert_eq!(summary.atd, 4.0);
    }

    #[test]
    fn atd_follows_stated_present_and_weekoff() {
        let mut grid = employee_row(&["P", "WO"]);
        grid.set(1, PRESENT_COL, 24.0);
        grid.set(1, WEEKOFF_COL, "4");
        let summary = compute_summary(&grid, 1, 3);
        assert_eq!(summary.atd, 28.0);

        grid.set(1, ATD_COL, "26.5");
        assert_eq!(compute_summary(&grid, 1, 3).atd, 26.5);

        grid.set(1, ATD_COL, "0");
        assert_eq!(compute_summary(&grid, 1, 3).atd, 0.0);
    }

    #[test]
    fn window_is_31_days() {
        let codes = vec!["P"; 40];
        let grid = employee_row(&codes);
        assert_eq!(compute_summary(&grid, 1, 3).present, 31.0);
        assert_eq!(compute_summary(&grid, 1, 10).present, 31.0);
        // Clipped at the last column
        assert_eq!(compute_summary(&grid, 1, 20).present, 23.0);
    }

    #[test]
    fn no_day_cells() {
        let grid = Grid::from_rows("Present", &[&["", "101", "John Doe"]]);
        assert_eq!(compute_summary(&grid, 0, 3), AttendanceSummary::default());
    }
}
