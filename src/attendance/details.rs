use crate::attendance::model::EmployeeDetails;
use crate::attendance::rules::DEPARTMENT_COL;
use crate::attendance::rules::MOBILE1_COL;
use crate::attendance::rules::MOBILE2_COL;
use crate::attendance::rules::PRESENT_ADDRESS_COL;
use crate::spreadsheet::Grid;

/// Reads the department, mobile and address columns of an employee row.
pub fn extract_details(grid: &Grid, row: usize) -> EmployeeDetails {
    let read = |col: usize| Some(grid.text(row, col)).filter(|text| !text.is_empty());
    EmployeeDetails {
        mobile1: read(MOBILE1_COL),
        mobile2: read(MOBILE2_COL),
        present_address: read(PRESENT_ADDRESS_COL),
        department: read(DEPARTMENT_COL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_detail_columns() {
        let mut grid = Grid::new("Present");
        grid.set(4, DEPARTMENT_COL, " Kitchen ");
        grid.set(4, MOBILE1_COL, 9876543210.0);
        grid.set(4, MOBILE2_COL, "   ");
        grid.set(4, PRESENT_ADDRESS_COL, "12 Hill Road");
        assert_eq!(
            extract_details(&grid, 4),
            EmployeeDetails {
                mobile1: Some("9876543210".to_owned()),
                mobile2: None,
                present_address: Some("12 Hill Road".to_owned()),
                department: Some("Kitchen".to_owned()),
            }
        );
    }

    #[test]
    fn empty_row() {
        let grid = Grid::from_rows("Present", &[&["", "101", "John Doe"]]);
        assert!(extract_details(&grid, 0).is_empty());
    }
}
