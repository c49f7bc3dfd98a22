//! Entry lookup inside workbook archives
//!
//! Entry names are matched case-insensitively with `\` read as `/`, since some writers
//! store `xl\worksheets\Sheet1.xml`.

use crate::error::WorkbookError;
use crate::helpers::xml::XmlReader;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use zip::read::ZipFile;
use zip::result::ZipError;
use zip::ZipArchive;

pub(crate) trait ZipHelper<RS: Read + Seek> {
    /// Stored name of the entry matching `name`, if any
    fn resolve(&self, name: &str) -> Option<String>;

    fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Opens an entry for reading
    fn file(&'_ mut self, name: &str) -> Result<Option<ZipFile<'_, RS>>, WorkbookError>;

    /// Reads a whole (small) entry, such as the ODS `mimetype`
    fn read_bytes(&mut self, name: &str) -> Result<Option<Vec<u8>>, WorkbookError> {
        match self.file(name)? {
            Some(mut file) => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)?;
                Ok(Some(bytes))
            }
            None => Ok(None),
        }
    }

    /// Opens an entry as an XML event stream
    fn xml_reader(
        &'_ mut self,
        name: &str,
    ) -> Result<Option<XmlReader<BufReader<ZipFile<'_, RS>>>>, WorkbookError> {
        Ok(self.file(name)?.map(|file| XmlReader::new(BufReader::new(file))))
    }
}

impl<RS: Read + Seek> ZipHelper<RS> for ZipArchive<RS> {
    fn resolve(&self, name: &str) -> Option<String> {
        let wanted = name.replace('\\', "/");
        self.file_names()
            .find(|stored| stored.replace('\\', "/").eq_ignore_ascii_case(&wanted))
            .map(str::to_owned)
    }

    fn file(&'_ mut self, name: &str) -> Result<Option<ZipFile<'_, RS>>, WorkbookError> {
        let Some(stored) = self.resolve(name) else {
            return Ok(None);
        };
        match self.by_name(&stored) {
            Ok(file) => Ok(Some(file)),
            Err(ZipError::FileNotFound) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn archive(entries: &[(&str, &str)]) -> ZipArchive<Cursor<Vec<u8>>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        ZipArchive::new(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn names_match_loosely() {
        let zip = archive(&[("xl\\Workbook.xml", "<workbook/>"), ("mimetype", "x")]);
        assert!(zip.contains("xl/workbook.xml"));
        assert!(zip.contains("MIMETYPE"));
        assert!(!zip.contains("content.xml"));
        assert_eq!(zip.resolve("xl/workbook.xml").as_deref(), Some("xl\\Workbook.xml"));
    }

    #[test]
    fn reads_small_entries() {
        let mut zip = archive(&[("mimetype", "application/vnd.oasis.opendocument.spreadsheet")]);
        assert_eq!(
            zip.read_bytes("mimetype").unwrap().as_deref(),
            Some(&b"application/vnd.oasis.opendocument.spreadsheet"[..])
        );
        assert!(zip.read_bytes("content.xml").unwrap().is_none());
        assert!(zip.xml_reader("content.xml").unwrap().is_none());
    }
}
