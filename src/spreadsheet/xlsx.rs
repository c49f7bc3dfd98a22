use crate::error::ResultMessage;
use crate::error::WorkbookError;
use crate::helpers::reader::UnifiedReader;
use crate::helpers::xml::XmlAttributeHelper;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::grid::Grid;
use crate::spreadsheet::grid::Range;
use crate::spreadsheet::reference::range_to_bounds;
use crate::spreadsheet::reference::reference_to_index;
use crate::spreadsheet::Spreadsheet;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::BufRead;
use zip::ZipArchive;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const RELATIONSHIPS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

const TAG_RELATIONSHIP: &[u8] = b"Relationship";
const TAG_SHEET: QName = QName(b"sheet");
const TAG_SHARED_STRING_ITEM: QName = QName(b"si");
// Phonetic guide runs, not part of the displayed text
const TAG_PHONETIC_TEXT: QName = QName(b"rPh");
const TAG_TEXT: QName = QName(b"t");
const TAG_DIMENSION: QName = QName(b"dimension");
const TAG_ROW: QName = QName(b"row");
const TAG_CELL: QName = QName(b"c");
const TAG_INLINE_STRING: QName = QName(b"is");
const TAG_VALUE: QName = QName(b"v");

/// Where the next cell lands when a writer omits the `r` attribute
#[derive(Default)]
struct CellCursor {
    row: usize,
    col: usize,
}

impl CellCursor {
    /// `number` is the 1-based `r` of the row element, when present
    fn enter_row(&mut self, number: Option<usize>) {
        if let Some(number) = number.filter(|number| *number > 0) {
            self.row = number - 1;
        }
        self.col = 0;
    }

    fn leave_row(&mut self) {
        self.row += 1;
    }

    fn place(&mut self, reference: Option<(usize, usize)>) -> (usize, usize) {
        let (row, col) = reference.unwrap_or((self.row, self.col));
        self.col = col + 1;
        (row, col)
    }
}

/// Maps the `t` attribute of a `<c>` element
fn cell_type(kind: Option<&str>) -> CellType {
    match kind {
        Some("inlineStr") | Some("str") => CellType::InlineString,
        Some("s") => CellType::SharedString,
        Some("d") => CellType::IsoDateTime,
        Some("b") => CellType::Boolean,
        Some("e") => CellType::Error,
        _ => CellType::Number,
    }
}

/// Office Open XML workbook reader
pub(crate) struct XlsxSpreadsheet {
    name: String,
    zip: ZipArchive<UnifiedReader>,
    /// (sheet name, worksheet part) in workbook order
    sheets: Vec<(String, String)>,
    /// Loaded on the first grid read
    shared_strings: Option<Vec<String>>,
}

impl XlsxSpreadsheet {
    /// Reads the sheet list of an opened XLSX archive
    pub(crate) fn open(name: &str, mut zip: ZipArchive<UnifiedReader>) -> Result<XlsxSpreadsheet, WorkbookError> {
        let sheets = load_workbook(&mut zip).with_prefix(WORKBOOK_PART)?;
        Ok(XlsxSpreadsheet {
            name: name.to_owned(),
            zip,
            sheets,
            shared_strings: None,
        })
    }

    fn load_shared_strings(&mut self) -> Result<Vec<String>, WorkbookError> {
        let mut shared_strings = Vec::<String>::new();
        // Workbooks holding only numbers may not have a string table at all
        let Some(mut reader) = self.zip.xml_reader(SHARED_STRINGS_PART)? else {
            return Ok(shared_strings);
        };
        match_xml_events!(reader => {
            Event::Start(event) if event.name() == TAG_SHARED_STRING_ITEM => {
                let string = read_string_value(&mut reader, TAG_SHARED_STRING_ITEM, false)?;
                shared_strings.push(string);
            }
        });
        Ok(shared_strings)
    }
}

impl Spreadsheet for XlsxSpreadsheet {
    fn name(&self) -> String {
        self.name.to_owned()
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.to_owned()).collect()
    }

    /// Parses one worksheet part into a grid
    ///
    /// Cells written without an `r` attribute continue from the previous position.
    fn read_grid(&mut self, sheet_name: &str, criteria: &Criteria) -> Result<Grid, WorkbookError> {
        let part = self.sheets
            .iter()
            .find(|(name, _)| name == sheet_name)
            .map(|(_, part)| part.to_owned())
            .ok_or_else(|| SpreadsheetError::SheetNotFound(sheet_name.to_owned()))?;
        if self.shared_strings.is_none() {
            self.shared_strings = Some(self.load_shared_strings().with_prefix(SHARED_STRINGS_PART)?);
        }
        let shared_strings = self.shared_strings.as_deref().unwrap_or_default();

        let mut grid = Grid::new(sheet_name);
        let mut cursor = CellCursor::default();
        let mut position = (0usize, 0usize);
        let mut kind = CellType::default();
        let mut value = String::new();
        let mut reader = self.zip
            .xml_reader(&part)?
            .ok_or_else(|| SpreadsheetError::FileError(part.to_owned()))?;
        match_xml_events!(reader => {
            Event::Start(event) if event.name() == TAG_DIMENSION => {
                let bounds = event.get_attribute_value("ref")?
                    .and_then(|reference| range_to_bounds(&reference));
                if let Some((first_row, first_col, last_row, last_col)) = bounds {
                    grid.declare_dimension(Range::new(first_row, first_col, last_row, last_col));
                }
            }
            Event::Start(event) if event.name() == TAG_ROW => {
                cursor.enter_row(event.parse_attribute_value::<usize>("r")?);
            }
            Event::End(event) if event.name() == TAG_ROW => cursor.leave_row(),
            Event::Start(event) if event.name() == TAG_CELL => {
                let reference = event.get_attribute_value("r")?
                    .and_then(|reference| reference_to_index(&reference));
                position = cursor.place(reference);
                kind = cell_type(event.get_attribute_value("t")?.as_deref());
                value.clear();
            }
            Event::Start(event) if event.name() == TAG_INLINE_STRING => {
                value = read_string_value(&mut reader, TAG_INLINE_STRING, false)?;
            }
            Event::Start(event) if event.name() == TAG_VALUE => {
                value = read_string_value(&mut reader, TAG_VALUE, true)?;
            }
            Event::End(event) if !value.is_empty() && event.name() == TAG_CELL => {
                let raw = std::mem::take(&mut value);
                let raw = match kind {
                    CellType::Error => {
                        criteria.on_error_cell(&self.name, sheet_name, position, &raw)?;
                        continue;
                    }
                    CellType::SharedString => {
                        let index = raw.trim().parse::<usize>()?;
                        shared_strings.get(index).cloned().unwrap_or_default()
                    }
                    _ => raw,
                };
                if let Some(typed) = kind.to_value(raw) {
                    let (row, col) = position;
                    grid.push(Cell { row, col, value: typed });
                }
            }
        });
        Ok(grid)
    }
}

/// Loads the worksheet list from `xl/workbook.xml`, resolving each sheet's part through
/// the workbook relationships.
///
/// # Returns
/// Worksheets as (name, zip_path) pairs in workbook order
fn load_workbook(zip: &mut ZipArchive<UnifiedReader>) -> Result<Vec<(String, String)>, WorkbookError> {
    let relationships = load_relationships(zip, RELATIONSHIPS_PART)?;
    let mut reader = zip.xml_reader(WORKBOOK_PART)?
        .ok_or_else(|| SpreadsheetError::FileError(WORKBOOK_PART.to_owned()))?;
    let mut sheets: Vec<(String, String)> = Vec::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHEET => {
            let mut name = None::<Cow<str>>;
            let mut id = None::<Cow<str>>;
            for result in event.attributes() {
                let attribute = result?;
                let key = attribute.key.local_name();
                if key.as_ref() == b"name" {
                    name = Some(attribute.get_value()?);
                } else if key.as_ref() == b"id" {
                    id = Some(attribute.get_value()?);
                }
            }
            if let Some((name, id)) = name.zip(id) {
                if let Some(path) = relationships.get(id.as_ref()) {
                    sheets.push((name.to_string(), path.to_owned()));
                }
            }
        }
    });
    Ok(sheets)
}

/// Loads worksheet relationships, mapping relationship IDs to worksheet parts
fn load_relationships(zip: &mut ZipArchive<UnifiedReader>, path: &str) -> Result<HashMap<String, String>, WorkbookError> {
    let mut reader = zip.xml_reader(path)?
        .ok_or_else(|| SpreadsheetError::FileError(path.to_string()))?;
    let mut relationships: HashMap<String, String> = HashMap::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
            let id = event.get_attribute_value("Id")?;
            let kind = event.get_attribute_value("Type")?;
            let target = event.get_attribute_value("Target")?;
            // Only worksheet relationships
            if kind.map(|it| it.ends_with("/worksheet")).unwrap_or(true) {
                if let Some((id, target)) = id.zip(target) {
                    relationships.insert(id.to_string(), to_zip_path(&target));
                }
            }
        }
    });
    Ok(relationships)
}

/// Resolves a relationship target to its path inside the archive
fn to_zip_path(path: &str) -> String {
    if let Some(path) = path.strip_prefix('/') {
        path.to_string()
    } else if path.starts_with("xl/") {
        path.to_string()
    } else {
        format!("xl/{path}")
    }
}

/// Reads string content up to `end_tag`, skipping phonetic runs
///
/// Rich-text runs (`<r><t>..</t></r>`) are concatenated. With `is_text_content` the element
/// body itself is the text (as for `<v>`).
fn read_string_value<R: BufRead>(
    reader: &mut XmlReader<R>,
    end_tag: QName,
    is_text_content: bool,
) -> Result<String, WorkbookError> {
    let mut is_phonetic_text = false;
    let mut is_text = is_text_content;
    let mut text = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.name() == end_tag => break,
        Event::Start(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = true,
        Event::End(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = false,
        Event::Start(event) if !is_phonetic_text && event.name() == TAG_TEXT => is_text = true,
        Event::End(event) if is_text && event.name() == TAG_TEXT => is_text = false,
        Event::Text(event) if is_text => text.push_bytes_text(&event)?,
        Event::CData(event) if is_text => text.push_str(&event.xml_content()?),
        Event::GeneralRef(event) if is_text => text.push_bytes_ref(&event)?,
    });
    Ok(text)
}
