//! The fixed ScanResults directory layout.

use crate::error::{LinkerError, LinkerResult};
use std::fs;
use std::path::{Path, PathBuf};

pub const INCOMING_DIR: &str = "ScanResults";
pub const CONVERTED_DIR: &str = "ModifiedResults";
pub const ARCHIVED_DIR: &str = "OldResults";

/// The three processing directories under a base directory:
/// incoming csv files, converted workbooks and bundles, archived sources.
#[derive(Debug, Clone)]
pub struct ScanDirs {
    pub incoming: PathBuf,
    pub converted: PathBuf,
    pub archived: PathBuf,
}

impl ScanDirs {
    /// Path math only; nothing is touched on disk.
    pub fn under(base: &Path) -> Self {
        let incoming = base.join(INCOMING_DIR);
        let converted = incoming.join(CONVERTED_DIR);
        let archived = incoming.join(ARCHIVED_DIR);
        Self {
            incoming,
            converted,
            archived,
        }
    }

    /// Create any missing directory, returning the ones actually created.
    /// Safe to call repeatedly; a second call creates nothing.
    pub fn ensure(&self) -> LinkerResult<Vec<PathBuf>> {
        let mut created = Vec::new();
        for dir in [&self.incoming, &self.converted, &self.archived] {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| {
                    LinkerError::Layout(format!("failed to create {}: {e}", dir.display()))
                })?;
                created.push(dir.clone());
            }
        }
        Ok(created)
    }
}
