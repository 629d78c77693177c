//! Csv parsing and plugin-id hyperlink rewriting.

use crate::error::{LinkerError, LinkerResult};
use crate::types::{ScanTable, PLUGIN_BASE_URL, PLUGIN_ID_COLUMN};
use std::path::Path;

/// Hyperlink formula for one plugin id: the cell displays the id and links
/// to the Tenable advisory page for it.
pub fn make_hyperlink(value: &str) -> String {
    format!("=HYPERLINK(\"{PLUGIN_BASE_URL}{value}\",\"{value}\")")
}

/// Parse one csv export into a [`ScanTable`]. Unreadable or ragged input
/// surfaces as [`LinkerError::Parse`]; a missing plugin-id column as
/// [`LinkerError::Schema`]. Neither is skipped silently, since writing a
/// workbook from a broken table would produce corrupt output.
pub fn load_scan_csv(path: &Path) -> LinkerResult<ScanTable> {
    let file = display_name(path);

    let mut reader = csv::Reader::from_path(path).map_err(|source| LinkerError::Parse {
        file: file.clone(),
        source,
    })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| LinkerError::Parse {
            file: file.clone(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let id_column = headers
        .iter()
        .position(|header| header == PLUGIN_ID_COLUMN)
        .ok_or_else(|| LinkerError::Schema {
            file: file.clone(),
            column: PLUGIN_ID_COLUMN.to_string(),
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| LinkerError::Parse {
            file: file.clone(),
            source,
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(ScanTable {
        headers,
        rows,
        id_column,
    })
}

impl ScanTable {
    /// Rewrite every plugin-id value into its hyperlink formula. All other
    /// cells, the column order, and the row order are untouched.
    pub fn linkify(&mut self) {
        let column = self.id_column;
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(column) {
                let linked = make_hyperlink(cell);
                *cell = linked;
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
