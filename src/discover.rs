//! Csv discovery in the incoming directory.

use crate::error::LinkerResult;
use std::fs;
use std::path::{Path, PathBuf};

/// List files ending in `.csv` directly under `dir`, in whatever order the
/// filesystem enumerates them. Subdirectories are not traversed and the
/// extension match is case-sensitive. An empty result is not an error.
pub fn find_csv_files(dir: &Path) -> LinkerResult<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "csv") {
            found.push(path);
        }
    }
    Ok(found)
}
