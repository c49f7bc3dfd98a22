use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellValue;
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Rows of a worksheet (1,048,576)
pub const MAX_ROWS: usize = 1 << 20;
/// Columns of a worksheet (`A` to `XFD`)
pub const MAX_COLS: usize = 1 << 14;

/// Inclusive bounding range of a grid (0-based).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Range {
    pub first_row: usize,
    pub first_col: usize,
    pub last_row: usize,
    pub last_col: usize,
}

impl Range {
    pub fn new(first_row: usize, first_col: usize, last_row: usize, last_col: usize) -> Self {
        Range {
            first_row,
            first_col,
            last_row,
            last_col,
        }
    }

    /// Checks if `(row, col)` lies inside the range.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.first_row <= row && row <= self.last_row && self.first_col <= col && col <= self.last_col
    }

    /// Range cut to the worksheet limits.
    pub fn clamped(&self) -> Range {
        Range {
            first_row: self.first_row.min(MAX_ROWS - 1),
            first_col: self.first_col.min(MAX_COLS - 1),
            last_row: self.last_row.min(MAX_ROWS - 1),
            last_col: self.last_col.min(MAX_COLS - 1),
        }
    }

    /// Smallest range covering both.
    fn union(&self, other: &Range) -> Range {
        Range {
            first_row: self.first_row.min(other.first_row),
            first_col: self.first_col.min(other.first_col),
            last_row: self.last_row.max(other.last_row),
            last_col: self.last_col.max(other.last_col),
        }
    }
}

/// Sparse, immutable-after-load store of the cells of one sheet.
///
/// Lookups outside the bounding range are always absent. A grid without any cell
/// reports the single-cell range `A1`, so scans over it visit one empty row.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    /// Sheet name
    pub(crate) name: String,
    /// All cells in the sheet
    cells: Vec<Cell>,
    /// Index mapping from (row, column) to cell vector position
    indexes: HashMap<(usize, usize), usize>,
    /// Actual data range, widened by any declared dimension
    bounds: Option<Range>,
}

impl Grid {
    pub fn new(name: &str) -> Self {
        Grid {
            name: name.to_owned(),
            ..Grid::default()
        }
    }

    /// Builds a grid from rows of text, starting at `A1`. Empty strings are left absent.
    pub fn from_rows(name: &str, rows: &[&[&str]]) -> Self {
        let mut grid = Grid::new(name);
        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                if !value.is_empty() {
                    grid.push(Cell::new(row, col, *value));
                }
            }
        }
        grid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the grid contains no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Adds a cell; a later cell at the same position replaces the earlier one.
    pub fn push(&mut self, cell: Cell) {
        let range = Range::new(cell.row, cell.col, cell.row, cell.col);
        self.widen(&range);
        match self.indexes.get(&(cell.row, cell.col)) {
            Some(index) => self.cells[*index] = cell,
            None => {
                self.indexes.insert((cell.row, cell.col), self.cells.len());
                self.cells.push(cell);
            }
        }
    }

    /// Sets a value at `(row, col)`.
    pub fn set<V: Into<CellValue>>(&mut self, row: usize, col: usize, value: V) {
        self.push(Cell::new(row, col, value));
    }

    /// Widens the bounding range to a dimension declared by the workbook.
    ///
    /// The declaration is only a hint, so it is clamped to the worksheet limits.
    pub fn declare_dimension(&mut self, range: Range) {
        self.widen(&range.clamped());
    }

    fn widen(&mut self, range: &Range) {
        self.bounds = Some(match &self.bounds {
            Some(bounds) => bounds.union(range),
            None => *range,
        });
    }

    /// Bounding range `(first_row, first_col, last_row, last_col)`.
    pub fn range(&self) -> Range {
        self.bounds.unwrap_or_default()
    }

    /// Row indexes covered by the bounding range, in scan order.
    pub fn rows(&self) -> RangeInclusive<usize> {
        let range = self.range();
        range.first_row..=range.last_row
    }

    /// Gets a cell at the specified position.
    /// Returns None if the position is outside the bounds or no cell exists there.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.range().contains(row, col) {
            self.indexes
                .get(&(row, col))
                .and_then(|index| self.cells.get(*index))
        } else {
            None
        }
    }

    pub fn value(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.get(row, col).map(|cell| &cell.value)
    }

    /// Textual value of a cell, untrimmed; `""` when absent.
    pub fn raw_text(&self, row: usize, col: usize) -> String {
        self.get(row, col).map(Cell::to_string).unwrap_or_default()
    }

    /// Textual value of a cell, trimmed; `""` when absent.
    pub fn text(&self, row: usize, col: usize) -> String {
        self.raw_text(row, col).trim().to_owned()
    }
}
