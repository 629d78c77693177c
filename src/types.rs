//! Core data types shared across the conversion pipeline.

use crate::error::LinkerError;
use std::path::PathBuf;

/// Column whose values are rewritten into Tenable advisory hyperlinks.
pub const PLUGIN_ID_COLUMN: &str = "Plugin ID";

/// Advisory page base URL; the plugin id is appended verbatim.
pub const PLUGIN_BASE_URL: &str = "https://tenable.com/plugins/nessus/";

/// Name of the single sheet written into every workbook.
pub const SHEET_NAME: &str = "Nessus Results";

/// One parsed csv export: header row plus data rows, all cells as text.
///
/// Invariant: every row holds exactly `headers.len()` cells, in the order
/// the columns appeared in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Index of the plugin-id column within `headers`.
    pub id_column: usize,
}

impl ScanTable {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Explicit run configuration handed to the pipeline. Components read their
/// flags from here, never from parse-time globals.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory the ScanResults tree lives under (the user's home by default).
    pub base_dir: PathBuf,
    /// Bundle converted workbooks into zip archive(s) after conversion.
    pub zip: bool,
    /// Encrypt the bundle(s); only meaningful together with `zip`.
    pub password_protect: bool,
    /// Pre-supplied bundle passphrase; skips the interactive prompt.
    pub passphrase: Option<String>,
    /// Pre-supplied name for a multi-file bundle; skips the interactive prompt.
    pub bundle_name: Option<String>,
    /// Skip the "Ready to continue?" gate.
    pub assume_yes: bool,
    pub verbose: bool,
}

impl RunConfig {
    /// Configuration with everything off, rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            zip: false,
            password_protect: false,
            passphrase: None,
            bundle_name: None,
            assume_yes: false,
            verbose: false,
        }
    }
}

/// What happened to one discovered csv file.
#[derive(Debug)]
pub struct FileOutcome {
    pub source: PathBuf,
    /// Path of the written workbook on success.
    pub result: Result<PathBuf, LinkerError>,
}

/// Collected per-file results of one batch run. The batch keeps going past
/// individual failures; the process exit code is derived from this report.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<FileOutcome>,
    /// Bundles produced after conversion, if bundling was requested.
    pub bundles: Vec<PathBuf>,
    /// Set when bundling was requested but failed.
    pub bundle_error: Option<LinkerError>,
    /// True when the user declined the continue gate.
    pub declined: bool,
}

impl RunReport {
    /// Paths of the workbooks that were written successfully.
    pub fn converted(&self) -> Vec<PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok().cloned())
            .collect()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_err())
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0 || self.bundle_error.is_some()
    }
}
