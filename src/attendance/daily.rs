use crate::attendance::classifier::classify;
use crate::attendance::model::DayStatus;
use crate::attendance::rules::parse_number;
use crate::attendance::rules::DAYS_IN_MONTH;
use crate::spreadsheet::Grid;

/// Builds the 31 day statuses of `row`, day 1 at `first_day_col`.
///
/// Overtime comes from an inline `OT` marker of the day cell, otherwise from a number in
/// the cell below, where sheets keep an overtime sub-row.
pub fn build_daily_grid(grid: &Grid, row: usize, first_day_col: usize) -> Vec<DayStatus> {
    (1..=DAYS_IN_MONTH)
        .map(|day| {
            let col = first_day_col + day - 1;
            let class = classify(&grid.raw_text(row, col));
            let mut ot = class.ot;
            if ot == 0.0 {
                if let Some(below) = parse_number(&grid.text(row.saturating_add(1), col)) {
                    ot = below;
                }
            }
            DayStatus {
                day: day as u8,
                code: class.code,
                ot,
            }
        })
        .collect()
}
