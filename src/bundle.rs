//! Zip bundling of converted workbooks.

use crate::error::{LinkerError, LinkerResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{AesMode, CompressionMethod, ZipWriter};

/// How converted workbooks map onto archives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleMode {
    /// Every workbook into one archive with the given name.
    Single { name: String },
    /// One archive per workbook, named after the workbook.
    PerFile,
}

/// Bundles workbooks into zip archives inside the output directory. Entries
/// are stored by base filename with no directory structure, AES-256
/// encrypted when a passphrase is set.
pub struct Bundler {
    output_dir: PathBuf,
    passphrase: Option<String>,
}

impl Bundler {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            passphrase: None,
        }
    }

    /// Encrypt every entry with an AES-256 passphrase.
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    /// Produce the archive(s) for `workbooks`, returning the paths written.
    /// Every member must exist up front; a missing one fails the whole call
    /// naming the file.
    pub fn bundle(&self, workbooks: &[PathBuf], mode: BundleMode) -> LinkerResult<Vec<PathBuf>> {
        if let Some(missing) = workbooks.iter().find(|workbook| !workbook.exists()) {
            return Err(LinkerError::Bundle(format!(
                "member file {} does not exist",
                missing.display()
            )));
        }

        match mode {
            BundleMode::Single { name } => {
                let archive = self.output_dir.join(format!("{name}.zip"));
                self.write_archive(&archive, workbooks)?;
                Ok(vec![archive])
            }
            BundleMode::PerFile => {
                let mut archives = Vec::with_capacity(workbooks.len());
                for workbook in workbooks {
                    let archive = self.output_dir.join(format!("{}.zip", base_stem(workbook)));
                    self.write_archive(&archive, std::slice::from_ref(workbook))?;
                    archives.push(archive);
                }
                Ok(archives)
            }
        }
    }

    fn write_archive(&self, archive_path: &Path, members: &[PathBuf]) -> LinkerResult<()> {
        let file = fs::File::create(archive_path).map_err(|e| {
            LinkerError::Bundle(format!("failed to create {}: {e}", archive_path.display()))
        })?;
        let mut zip = ZipWriter::new(file);

        for member in members {
            let entry_name = member
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let contents = fs::read(member).map_err(|e| {
                LinkerError::Bundle(format!("failed to read {}: {e}", member.display()))
            })?;

            zip.start_file(entry_name, self.entry_options())?;
            zip.write_all(&contents)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn entry_options(&self) -> zip::write::FileOptions<'_, ()> {
        let mut options = SimpleFileOptions::default().compression_method(bundle_compression());
        if let Some(passphrase) = &self.passphrase {
            options = options.with_aes_encryption(AesMode::Aes256, passphrase);
        }
        options
    }
}

fn base_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".to_string())
}

/// Deflate when compiled in, stored otherwise.
fn bundle_compression() -> CompressionMethod {
    if cfg!(feature = "deflate") {
        CompressionMethod::Deflated
    } else {
        CompressionMethod::Stored
    }
}
