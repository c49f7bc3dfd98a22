use crate::attendance::rules::SHEET_NAME_KEYWORDS;
use crate::error::WorkbookError;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::SpreadsheetError;
use glob::Pattern;

/// Options for selecting and decoding the attendance sheet of a workbook.
#[derive(Clone, Debug)]
pub struct Criteria {
    /// Sheet name patterns, matched against the lowercased, trimmed sheet name.
    pub(crate) sheet_name_patterns: Vec<Pattern>,

    /// Treat error cells (`#N/A`, `#REF!`, ...) as absent instead of failing the read.
    pub(crate) error_as_null: bool,
}

impl Default for Criteria {
    fn default() -> Self {
        Criteria {
            sheet_name_patterns: SHEET_NAME_KEYWORDS
                .iter()
                .map(|keyword| Pattern::new(&format!("*{keyword}*")).expect("Hardcode glob pattern"))
                .collect(),
            error_as_null: true,
        }
    }
}

impl Criteria {
    /// Replaces the sheet name patterns, e.g. `["*attendance*"]`.
    pub fn with_sheet_patterns(mut self, patterns: &[&str]) -> Result<Self, WorkbookError> {
        self.sheet_name_patterns = patterns
            .iter()
            .map(|pattern| Pattern::new(&pattern.to_lowercase()))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    pub fn error_as_null(mut self, error_as_null: bool) -> Self {
        self.error_as_null = error_as_null;
        self
    }

    /// Checks if a sheet name matches any pattern.
    pub fn accept(&self, sheet_name: &str) -> bool {
        let name = sheet_name.trim().to_lowercase();
        self.sheet_name_patterns
            .iter()
            .any(|pattern| pattern.matches(&name))
    }

    /// Handles an error cell met while decoding: logged and skipped, or fatal when strict.
    pub(crate) fn on_error_cell(
        &self,
        workbook: &str,
        sheet_name: &str,
        (row, col): (usize, usize),
        value: &str,
    ) -> Result<(), WorkbookError> {
        let reference = index_to_reference(row, col);
        if self.error_as_null {
            log::warn!("Skipping error value '{value}' at {reference} in sheet '{sheet_name}'");
            Ok(())
        } else {
            Err(SpreadsheetError::CellValueError(
                workbook.to_owned(),
                sheet_name.to_owned(),
                reference,
                value.to_owned(),
            )
            .into())
        }
    }
}
