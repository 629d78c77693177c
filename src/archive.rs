//! Post-conversion archiving of source files.

use crate::error::{LinkerError, LinkerResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Move `source` into `archived_dir`, keeping its filename. An existing file
/// with the same name is overwritten (last write wins). The workbook written
/// before this call is never rolled back on failure.
pub fn archive_source(source: &Path, archived_dir: &Path) -> LinkerResult<PathBuf> {
    let name = source.file_name().ok_or_else(|| LinkerError::Archive {
        file: source.display().to_string(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "source has no filename"),
    })?;
    let dest = archived_dir.join(name);

    if fs::rename(source, &dest).is_err() {
        // rename cannot cross filesystems; copy then remove
        fs::copy(source, &dest)
            .and_then(|_| fs::remove_file(source))
            .map_err(|e| LinkerError::Archive {
                file: source.display().to_string(),
                source: e,
            })?;
    }

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn moves_file_keeping_its_name() {
        let dir = TempDir::new().unwrap();
        let archived = dir.path().join("OldResults");
        fs::create_dir(&archived).unwrap();
        let source = dir.path().join("scan1.csv");
        fs::write(&source, "Plugin ID\n19506\n").unwrap();

        let dest = archive_source(&source, &archived).unwrap();

        assert_eq!(dest, archived.join("scan1.csv"));
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(dest).unwrap(), "Plugin ID\n19506\n");
    }

    #[test]
    fn same_name_collision_is_last_write_wins() {
        let dir = TempDir::new().unwrap();
        let archived = dir.path().join("OldResults");
        fs::create_dir(&archived).unwrap();
        fs::write(archived.join("scan1.csv"), "old contents").unwrap();
        let source = dir.path().join("scan1.csv");
        fs::write(&source, "new contents").unwrap();

        archive_source(&source, &archived).unwrap();

        assert_eq!(
            fs::read_to_string(archived.join("scan1.csv")).unwrap(),
            "new contents"
        );
    }

    #[test]
    fn missing_destination_directory_is_an_archive_error() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("scan1.csv");
        fs::write(&source, "data").unwrap();

        let err = archive_source(&source, &dir.path().join("nowhere")).unwrap_err();

        assert!(matches!(err, LinkerError::Archive { .. }), "got {err:?}");
        assert!(source.exists(), "failed move must leave the source in place");
    }
}
