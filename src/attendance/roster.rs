use crate::attendance::model::Employee;
use crate::attendance::rules::is_ignored;
use crate::attendance::rules::NAME_COL;
use crate::attendance::rules::NUMBER_COL;
use crate::spreadsheet::Grid;
use std::collections::HashSet;

/// Identity cells `(number, name)` of a row, trimmed.
pub(crate) fn identity(grid: &Grid, row: usize) -> (String, String) {
    (grid.text(row, NUMBER_COL), grid.text(row, NAME_COL))
}

/// Checks if a row is not an employee row: either identity cell is blank, a header label
/// or a lone dot.
pub(crate) fn is_ignored_row(number: &str, name: &str) -> bool {
    is_ignored(number) || is_ignored(name)
}

/// Lists the distinct employees of the sheet in row order.
///
/// The first row of an employee number wins.
pub fn extract_roster(grid: &Grid) -> Vec<Employee> {
    let mut seen = HashSet::new();
    let mut employees = Vec::new();
    for row in grid.rows() {
        let (number, name) = identity(grid, row);
        if is_ignored_row(&number, &name) {
            continue;
        }
        let employee = Employee { number, name };
        if seen.insert(employee.key().to_owned()) {
            employees.push(employee);
        }
    }
    employees
}
