use crate::error::ResultMessage;
use crate::error::WorkbookError;
use crate::helpers::reader::UnifiedReader;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::grid::Grid;
use crate::spreadsheet::Spreadsheet;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::name::QName;
use thiserror::Error;
use zip::ZipArchive;

const CONTENT: &str = "content.xml";

const SPREADSHEET: QName = QName(b"office:spreadsheet");
const TABLE: QName = QName(b"table:table");
const TABLE_ROW: QName = QName(b"table:table-row");
const TABLE_CELL: QName = QName(b"table:table-cell");
// Cells hidden under a merged range
const TABLE_COVERED_CELL: QName = QName(b"table:covered-table-cell");
// Comments attached to a cell, never part of its value
const ANNOTATION: QName = QName(b"office:annotation");
const PARAGRAPH: QName = QName(b"text:p");
// Run of `text:c` spaces
const SPACES: QName = QName(b"text:s");

#[derive(Error, Debug)]
pub enum OdsError {
    #[error("Table without a name in content.xml")]
    MissingTableName,
}

/// OpenDocument spreadsheet reader; every table lives in `content.xml`
pub(crate) struct OdsSpreadsheet {
    name: String,
    zip: ZipArchive<UnifiedReader>,
    sheets: Vec<String>,
}

impl OdsSpreadsheet {
    /// Reads the table list of an opened ODS archive
    pub(crate) fn open(name: &str, mut zip: ZipArchive<UnifiedReader>) -> Result<Self, WorkbookError> {
        let sheets = load_table_names(&mut zip).with_prefix(CONTENT)?;
        Ok(OdsSpreadsheet {
            name: name.to_owned(),
            zip,
            sheets,
        })
    }
}

impl Spreadsheet for OdsSpreadsheet {
    fn name(&self) -> String {
        self.name.to_owned()
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.to_owned()
    }

    /// Reads one table of `content.xml`, expanding repeated rows and columns
    fn read_grid(&mut self, sheet_name: &str, criteria: &Criteria) -> Result<Grid, WorkbookError> {
        if !self.sheets.iter().any(|name| name == sheet_name) {
            Err(SpreadsheetError::SheetNotFound(sheet_name.to_owned()))?;
        }
        let mut reader = self.zip
            .xml_reader(CONTENT)?
            .ok_or_else(|| SpreadsheetError::FileError(CONTENT.to_owned()))?;
        let mut grid = Grid::new(sheet_name);

        // Skip to the requested table
        let mut found = false;
        match_xml_events!(reader => {
            Event::End(event) if event.name() == SPREADSHEET => break,
            Event::Start(event) if event.name() == TABLE => {
                if event.get_attribute_value("table:name")?.map(|name| name == sheet_name).unwrap_or(false) {
                    found = true;
                    break;
                }
            }
        });
        if !found {
            Err(SpreadsheetError::SheetNotFound(sheet_name.to_owned()))?;
        }

        let mut row = 0usize;
        let mut col = 0usize;
        let mut row_count = 1usize;
        let mut col_count = 1usize;
        let mut kind = CellType::default();
        let mut value = String::new();
        let mut element_context = false; // reading string content of the cell
        let mut comment_context = false; // inside an annotation
        match_xml_events!(reader => {
            Event::End(event) if event.name() == TABLE => break,
            Event::Start(event) if event.name() == TABLE_ROW => {
                row_count = event.parse_attribute_value("table:number-rows-repeated")?.unwrap_or(1);
                col = 0;
            }
            Event::End(event) if event.name() == TABLE_ROW => {
                row += row_count;
            }
            Event::Start(event) if event.name() == TABLE_CELL || event.name() == TABLE_COVERED_CELL => {
                col_count = event.parse_attribute_value::<usize>("table:number-columns-repeated")?.unwrap_or(1);
                value.clear();
                kind = read_value_type(&event, &mut value)?;
                element_context = matches!(kind, CellType::InlineString | CellType::Error);
            }
            Event::End(event) if event.name() == TABLE_CELL || event.name() == TABLE_COVERED_CELL => {
                if kind == CellType::Error {
                    criteria.on_error_cell(&self.name, sheet_name, (row, col), &value)?;
                } else if !value.is_empty() {
                    for row_offset in 0..row_count {
                        for col_offset in 0..col_count {
                            if let Some(typed) = kind.to_value(value.to_owned()) {
                                grid.push(Cell { row: row + row_offset, col: col + col_offset, value: typed });
                            }
                        }
                    }
                }
                col += col_count;
                element_context = false;
                comment_context = false;
            }
            Event::Start(event) if element_context && event.name() == ANNOTATION => comment_context = true,
            Event::End(event) if element_context && comment_context && event.name() == ANNOTATION => comment_context = false,
            Event::Start(event) if element_context && !comment_context && event.name() == PARAGRAPH => {
                if !value.is_empty() {
                    value.push('\n');
                }
            }
            Event::Start(event) if element_context && !comment_context && event.name() == SPACES => {
                let count = event.parse_attribute_value::<usize>("text:c")?.unwrap_or(1);
                for _ in 0..count {
                    value.push(' ');
                }
            }
            Event::Text(event) if element_context && !comment_context => value.push_bytes_text(&event)?,
            Event::GeneralRef(event) if element_context && !comment_context => value.push_bytes_ref(&event)?,
        });
        Ok(grid)
    }
}

/// Reads the `office:value-type` of a cell
///
/// Typed cells carry their value in an attribute, which is copied into `value`; string cells
/// (and string errors) are filled from the paragraphs that follow.
fn read_value_type(event: &BytesStart, value: &mut String) -> Result<CellType, WorkbookError> {
    let Some(value_type) = event.get_attribute_value("office:value-type")? else {
        return Ok(CellType::Empty);
    };
    let (kind, attribute) = match value_type.as_ref() {
        "string" => {
            let is_error = event.get_attribute_value("calcext:value-type")?
                .map(|calc_type| calc_type == "error")
                .unwrap_or(false);
            return Ok(if is_error { CellType::Error } else { CellType::InlineString });
        }
        "boolean" => {
            let truthy = event.get_attribute_value("office:boolean-value")?
                .map(|flag| flag != "false" && flag != "0")
                .unwrap_or(false);
            value.push_str(if truthy { "1" } else { "0" });
            return Ok(CellType::Boolean);
        }
        "date" => (CellType::IsoDateTime, "office:date-value"),
        "time" => (CellType::IsoDuration, "office:time-value"),
        _ => (CellType::Number, "office:value"),
    };
    if let Some(data) = event.get_attribute_value(attribute)? {
        value.push_str(&data);
    }
    Ok(kind)
}

/// Collects the `table:name` of every table in document order
fn load_table_names(zip: &mut ZipArchive<UnifiedReader>) -> Result<Vec<String>, WorkbookError> {
    let mut reader = zip
        .xml_reader(CONTENT)?
        .ok_or_else(|| SpreadsheetError::FileError(CONTENT.to_owned()))?;
    let mut names = Vec::new();
    match_xml_events!(reader => {
        Event::End(event) if event.name() == SPREADSHEET => break,
        Event::Start(event) if event.name() == TABLE => {
            let name = event.get_attribute_value("table:name")?.ok_or(OdsError::MissingTableName)?;
            names.push(name.to_string());
        }
    });
    Ok(names)
}
