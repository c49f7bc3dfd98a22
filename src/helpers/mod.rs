//! Low-level plumbing for reading workbook archives
pub(crate) mod reader;
pub(crate) mod xml;
pub(crate) mod zip;
