//! Locates the column holding day 1 of an employee row.
//!
//! Every candidate column samples a window of cells to its right and scores how much the
//! window looks like daily attendance codes. The leftmost best score wins.
use crate::attendance::classifier::classify;
use crate::attendance::rules::parse_number;
use crate::spreadsheet::Grid;

/// Leftmost candidate (column D); also the answer when no candidate scores
const FIRST_CANDIDATE_COL: usize = 3;
/// Rightmost candidate (column U)
const LAST_CANDIDATE_COL: usize = 20;
/// Cells sampled to the right of a candidate, the candidate included
const SAMPLE_WIDTH: usize = 10;

const CODE_WEIGHT: i32 = 3;
const BLANK_WEIGHT: i32 = 1;
/// Numeric overtime in the row below
const OT_ROW_WEIGHT: i32 = 1;
/// Text longer than a code
const LONG_TEXT_PENALTY: i32 = 3;
const LONG_TEXT_CHARS: usize = 3;
/// Windows with fewer code cells than this look like something else
const MIN_CODE_HITS: usize = 2;
const FEW_CODES_PENALTY: i32 = 5;
/// Best score before any candidate is considered
const INITIAL_BEST_SCORE: i32 = -1;

/// Scores every candidate column of `row`, left to right.
pub fn score_candidates(grid: &Grid, row: usize) -> Vec<(usize, i32)> {
    let last_col = grid.range().last_col;
    (FIRST_CANDIDATE_COL..=last_col.min(LAST_CANDIDATE_COL))
        .map(|col| (col, score_window(grid, row, col, last_col)))
        .collect()
}

fn score_window(grid: &Grid, row: usize, first_col: usize, last_col: usize) -> i32 {
    let mut score = 0;
    let mut code_hits = 0;
    for col in (first_col..first_col + SAMPLE_WIDTH).take_while(|col| *col <= last_col) {
        let text = grid.text(row, col).to_uppercase();
        if classify(&text).has_code() {
            score += CODE_WEIGHT;
            code_hits += 1;
        } else if text.is_empty() {
            score += BLANK_WEIGHT;
        } else if text.chars().count() > LONG_TEXT_CHARS {
            score -= LONG_TEXT_PENALTY;
        }

        let below = grid.text(row.saturating_add(1), col);
        if !below.is_empty() && parse_number(&below).is_some() {
            score += OT_ROW_WEIGHT;
        }
    }
    if code_hits < MIN_CODE_HITS {
        score -= FEW_CODES_PENALTY;
    }
    score
}

/// Column of day 1 for `row`.
///
/// Falls back to column D when the sheet is narrower than D or no candidate beats
/// the initial best score.
pub fn locate_first_day_column(grid: &Grid, row: usize) -> usize {
    let mut best_col = FIRST_CANDIDATE_COL;
    let mut best_score = INITIAL_BEST_SCORE;
    for (col, score) in score_candidates(grid, row) {
        if score > best_score {
            best_col = col;
            best_score = score;
        }
    }
    log::debug!("Row {} of sheet '{}': day 1 at column {} (score {})", row, grid.name(), best_col, best_score);
    best_col
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_codes(row: usize, first_col: usize, codes: &[&str]) -> Grid {
        let mut grid = Grid::new("Present");
        grid.set(row, 1, "101");
        grid.set(row, 2, "John Doe");
        for (offset, code) in codes.iter().enumerate() {
            grid.set(row, first_col + offset, *code);
        }
        grid
    }

    #[test]
    fn codes_at_column_d() {
        let grid = with_codes(1, 3, &["P", "P", "A", "WO", "P"]);
        assert_eq!(locate_first_day_column(&grid, 1), 3);
    }

    #[test]
    fn codes_after_extra_identity_columns() {
        let mut grid = with_codes(0, 6, &["P", "P", "P", "A", "P", "P", "WO", "P", "P", "P"]);
        grid.set(0, 3, "Operator");
        grid.set(0, 4, "Kitchen staff");
        grid.set(0, 5, "Night shift");
        assert_eq!(locate_first_day_column(&grid, 0), 6);
    }

    #[test]
    fn leftmost_maximum_wins() {
        // A short non-code cell adds nothing, so D ties with E
        let grid = with_codes(0, 3, &["x", "P", "P"]);
        assert_eq!(score_candidates(&grid, 0), vec![(3, 6), (4, 6), (5, -2)]);
        assert_eq!(locate_first_day_column(&grid, 0), 3);
    }

    #[test]
    fn scores_by_window() {
        let mut grid = with_codes(0, 3, &["P", "Absent", "x", "Remarks"]);
        grid.set(1, 3, "2");
        grid.set(1, 4, "OT");
        // D: P(+3) Absent(+3) x(0) Remarks(-3), OT row +1 under D
        // E: Absent(+3) x Remarks(-3), one code hit (-5)
        // F: x Remarks(-3), no code hit (-5)
        // G: Remarks(-3), no code hit (-5)
        assert_eq!(score_candidates(&grid, 0), vec![(3, 4), (4, -5), (5, -8), (6, -8)]);
    }

    #[test]
    fn narrow_or_unscored_rows_fall_back_to_column_d() {
        let grid = Grid::from_rows("Present", &[&["", "101", "John"]]);
        assert!(score_candidates(&grid, 0).is_empty());
        assert_eq!(locate_first_day_column(&grid, 0), 3);

        let grid = with_codes(0, 3, &["Leave", "Leave", "Leave"]);
        assert_eq!(locate_first_day_column(&grid, 0), 3);
    }

    #[test]
    fn candidates_stop_at_column_u() {
        let mut grid = with_codes(0, 25, &["P", "P", "P"]);
        grid.set(0, 40, "x");
        let scores = score_candidates(&grid, 0);
        assert_eq!(scores.first().map(|(col, _)| *col), Some(3));
        assert_eq!(scores.last().map(|(col, _)| *col), Some(20));
        // U sees the codes from Z on and seven blanks
        assert_eq!(scores.last().map(|(_, score)| *score), Some(9 + 7));
    }
}
