use crate::attendance::ExtractionError;
use crate::spreadsheet::Criteria;

/// Picks the attendance sheet: the first name, in workbook order, accepted by `criteria`.
pub fn locate_attendance_sheet<'a>(
    sheet_names: &'a [String],
    criteria: &Criteria,
) -> Result<&'a str, ExtractionError> {
    let name = sheet_names
        .iter()
        .find(|name| criteria.accept(name))
        .ok_or(ExtractionError::SheetNotFound)?;
    log::debug!("Selected attendance sheet '{}' of {:?}", name, sheet_names);
    Ok(name)
}
