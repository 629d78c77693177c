//! Workbook output for converted scan tables.

mod writer;

pub use writer::WorkbookWriter;
