//! Styled workbook writer built on rust_xlsxwriter.

use crate::error::{LinkerError, LinkerResult};
use crate::types::{ScanTable, SHEET_NAME};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Formula, Workbook};
use std::path::Path;

/// Header row fill, a cornflower blue.
const HEADER_FILL: u32 = 0x6495ED;

/// Writes one converted scan table as a single-sheet styled workbook.
pub struct WorkbookWriter {
    table: ScanTable,
}

impl WorkbookWriter {
    pub fn new(table: ScanTable) -> Self {
        Self { table }
    }

    /// Serialize the table to `output_path`.
    ///
    /// Header cells are written explicitly from the column names so the
    /// header style always lands. The plugin-id column carries a blue font
    /// across the whole column, header position included; the header cell
    /// still renders with the header style because cell formats override
    /// column formats.
    pub fn write(&self, output_path: &Path) -> LinkerResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| write_err(output_path, e))?;

        let header_format = Format::new()
            .set_bold()
            .set_align(FormatAlign::Top)
            .set_font_color(Color::Black)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_border(FormatBorder::Thin);
        let id_format = Format::new().set_font_color(Color::Blue);

        worksheet
            .set_column_format(self.table.id_column as u16, &id_format)
            .map_err(|e| write_err(output_path, e))?;

        for (col, name) in self.table.headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, name, &header_format)
                .map_err(|e| write_err(output_path, e))?;
        }

        for (row, cells) in self.table.rows.iter().enumerate() {
            let excel_row = (row + 1) as u32;
            for (col, cell) in cells.iter().enumerate() {
                if col == self.table.id_column {
                    worksheet
                        .write_formula_with_format(
                            excel_row,
                            col as u16,
                            Formula::new(cell),
                            &id_format,
                        )
                        .map_err(|e| write_err(output_path, e))?;
                } else if let Some(number) = parse_number(cell) {
                    worksheet
                        .write_number(excel_row, col as u16, number)
                        .map_err(|e| write_err(output_path, e))?;
                } else {
                    worksheet
                        .write_string(excel_row, col as u16, cell)
                        .map_err(|e| write_err(output_path, e))?;
                }
            }
        }

        workbook
            .save(output_path)
            .map_err(|e| write_err(output_path, e))?;

        Ok(())
    }
}

/// Cells that parse as finite numbers are written as numbers; everything
/// else stays text.
fn parse_number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn write_err(path: &Path, source: rust_xlsxwriter::XlsxError) -> LinkerError {
    LinkerError::Write {
        file: path.display().to_string(),
        source,
    }
}
