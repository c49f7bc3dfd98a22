use crate::error::WorkbookError;
use std::fs::File;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

/// A unified reader over a workbook stored on disk or held in memory
pub(crate) enum UnifiedReader {
    /// Local file reader
    Local(BufReader<File>),
    /// In-memory buffer (e.g. an uploaded file)
    Memory(Cursor<Vec<u8>>),
}

impl UnifiedReader {
    /// Opens a local file
    ///
    /// # Arguments
    /// * `path` - Path to the file
    ///
    /// # Returns
    /// * `Result<UnifiedReader, WorkbookError>` - Reader for the file content
    pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<UnifiedReader, WorkbookError> {
        let file = File::open(path)?;
        Ok(UnifiedReader::Local(BufReader::new(file)))
    }

    /// Wraps bytes already loaded by the caller
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> UnifiedReader {
        UnifiedReader::Memory(Cursor::new(bytes))
    }
}

impl Read for UnifiedReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            UnifiedReader::Local(reader) => reader.read(buf),
            UnifiedReader::Memory(reader) => reader.read(buf),
        }
    }
}

impl Seek for UnifiedReader {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        match self {
            UnifiedReader::Local(reader) => reader.seek(pos),
            UnifiedReader::Memory(reader) => reader.seek(pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_local_file() {
        // Cargo.toml always exists at the crate root when tests run
        let result = UnifiedReader::open("Cargo.toml");
        assert!(result.is_ok(), "Failed to open local file: {:?}", result.err());

        let result = UnifiedReader::open("non_existent_file.xlsx");
        assert!(matches!(result, Err(WorkbookError::IoError(_))));
    }

    #[test]
    fn test_memory_reader_reads_and_seeks() {
        let mut reader = UnifiedReader::from_bytes(b"PK\x03\x04".to_vec());
        let mut head = [0u8; 2];
        reader.read_exact(&mut head).unwrap();
        assert_eq!(&head, b"PK");
        reader.seek(std::io::SeekFrom::Start(0)).unwrap();
        let mut all = Vec::new();
        reader.read_to_end(&mut all).unwrap();
        assert_eq!(all.len(), 4);
    }
}
