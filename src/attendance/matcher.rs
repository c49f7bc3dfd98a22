use crate::attendance::model::Employee;
use crate::attendance::roster::identity;
use crate::attendance::roster::is_ignored_row;
use crate::attendance::rules::normalize_for_compare;
use crate::attendance::ExtractionError;
use crate::error::AttendanceError;
use crate::spreadsheet::Grid;

/// Employee lookup by number and/or name.
///
/// Both parts are compared after normalization, so `"101."` finds `101` and
/// `"john   doe"` finds `John Doe`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeQuery {
    number: Option<String>,
    name: Option<String>,
}

impl EmployeeQuery {
    /// Builds a query from optional parts; empty strings count as missing.
    ///
    /// # Errors
    /// `InvalidQuery` when neither a number nor a name is given.
    pub fn new(number: Option<&str>, name: Option<&str>) -> Result<Self, AttendanceError> {
        let number = number.filter(|number| !number.is_empty());
        let name = name.filter(|name| !name.is_empty());
        if number.is_none() && name.is_none() {
            return Err(AttendanceError::InvalidQuery);
        }
        Ok(EmployeeQuery {
            number: number.map(normalize_for_compare),
            name: name.map(normalize_for_compare),
        })
    }

    pub fn by_number(number: &str) -> Result<Self, AttendanceError> {
        EmployeeQuery::new(Some(number), None)
    }

    pub fn by_name(name: &str) -> Result<Self, AttendanceError> {
        EmployeeQuery::new(None, Some(name))
    }

    /// A part that normalizes to nothing (like `"."`) never matches.
    fn matches(&self, number: &str, name: &str) -> bool {
        let matches = |query: &Option<String>, value: &str| match query {
            Some(query) if !query.is_empty() => *query == normalize_for_compare(value),
            _ => false,
        };
        matches(&self.number, number) || matches(&self.name, name)
    }
}

/// Employee row found by [`find_employee`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeMatch {
    pub row: usize,
    pub employee: Employee,
}

/// Finds the first employee row matching `query`, scanning rows top to bottom.
pub fn find_employee(grid: &Grid, query: &EmployeeQuery) -> Result<EmployeeMatch, ExtractionError> {
    for row in grid.rows() {
        let (number, name) = identity(grid, row);
        if is_ignored_row(&number, &name) {
            continue;
        }
        if query.matches(&number, &name) {
            log::debug!("Matched {:?} at row {} of sheet '{}'", query, row, grid.name());
            return Ok(EmployeeMatch {
                row,
                employee: Employee { number, name },
            });
        }
    }
    Err(ExtractionError::EmployeeNotFound)
}
